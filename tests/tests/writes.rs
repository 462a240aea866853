use searchmap::{
    schema::{IndexDefinition, SourceKind},
    FieldMapping, Repository,
};
use serde::Serialize;
use tests::prelude::*;

fn posts(test: &DbTest) -> Repository {
    let definition = IndexDefinition::builder("posts")
        .on(SourceKind::Hash)
        .prefix(test.key("post:"))
        .field(FieldMapping::text("$.title", "title").unwrap())
        .field(FieldMapping::numeric("$.views", "views").unwrap())
        .build()
        .unwrap();

    Repository::new(definition).query("popular", "@views:[${min} +inf]")
}

async fn hash_documents(test: &mut DbTest) {
    let mut builder = Db::builder();
    builder.repository(posts(test));
    let db = test.setup_db(builder).await;
    test.log().clear();

    db.hash_set(
        &test.key("post:1"),
        [("title", Value::from("hello")), ("views", Value::from(3))],
    )
    .await
    .unwrap();
    db.hash_set(
        &test.key("post:2"),
        [("title", Value::from("goodbye")), ("views", Value::from(30))],
    )
    .await
    .unwrap();

    assert_eq!(
        test.log().commands()[0],
        format!("HSET {} title hello views 3", test.key("post:1"))
    );

    let result = db
        .call("popular", args! { "min" => 10 })
        .await
        .unwrap()
        .into_search()
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.docs[0].id, test.key("post:2"));
    assert_eq!(result.docs[0].get_str("title"), Some("goodbye"));
}

async fn hash_needs_fields(test: &mut DbTest) {
    let mut builder = Db::builder();
    builder.repository(posts(test));
    let db = test.setup_db(builder).await;

    let err = db
        .hash_set(&test.key("post:1"), Vec::<(String, Value)>::new())
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

async fn json_documents_from_structs(test: &mut DbTest) {
    #[derive(Serialize)]
    struct Article<'a> {
        title: &'a str,
        tag: Vec<&'a str>,
        views: i64,
    }

    let db = test.setup_db(fixtures::builder(test)).await;

    db.json_set(
        &test.key("doc9"),
        &Article {
            title: "serialized title",
            tag: vec!["news"],
            views: 1,
        },
    )
    .await
    .unwrap();

    let result = db
        .call("by_title", args! { "title" => "serialized" })
        .await
        .unwrap()
        .into_search()
        .unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.docs[0].id, test.key("doc9"));
}

tests!(hash_documents, hash_needs_fields, json_documents_from_structs);
