use crate::Result;

use searchmap_core::Driver;

use std::sync::Arc;
use url::Url;

/// Opens the driver matching the scheme of `url`.
pub(super) async fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let parsed = Url::parse(url).map_err(|err| crate::err!("invalid url `{url}`: {err}"))?;

    match parsed.scheme() {
        "redis" | "rediss" => connect_redis(&parsed).await,
        scheme => Err(crate::err!(
            "unsupported backend; scheme={scheme}; url={url}"
        )),
    }
}

#[cfg(feature = "redis")]
async fn connect_redis(url: &Url) -> Result<Arc<dyn Driver>> {
    let driver = searchmap_driver_redis::Redis::connect(url.as_str()).await?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "redis"))]
async fn connect_redis(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(crate::err!("`redis` feature not enabled"))
}
