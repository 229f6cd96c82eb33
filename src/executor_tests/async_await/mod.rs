use std::{
    sync::{Arc, LazyLock, Mutex, PoisonError},
    time::Duration,
};

use pretty_assertions::assert_eq;
use tokio::{sync::Notify, time};

use crate::{
    ast::{Document, Field, Operation, OperationType, Selection, Variables},
    executor::RequestId,
    graphql_value,
    schema::model::Operations,
    types::base::{Resolvers, TypedObject},
    value::Value,
};

#[derive(Default)]
struct Timeline {
    log: Mutex<Vec<&'static str>>,
    ping: Notify,
    pong: Notify,
}

impl Timeline {
    fn push(&self, event: &'static str) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn events(&self) -> Vec<&'static str> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

static TIMELINE: LazyLock<Resolvers<Timeline>> = LazyLock::new(|| {
    Resolvers::<Timeline>::new("Timeline")
        .field("slow", |t, p| {
            Box::pin(async move {
                time::sleep(Duration::from_millis(50)).await;
                t.push("slow");
                Ok(p.resolve("slow").await)
            })
        })
        .field("fast", |t, p| {
            Box::pin(async move {
                t.push("fast");
                Ok(p.resolve("fast").await)
            })
        })
        .field("delayed", |_, p| {
            Box::pin(async move {
                let ms = p.argument::<i32>("ms")?;
                time::sleep(Duration::from_millis(ms.unsigned_abs().into())).await;
                Ok(p.resolve(ms).await)
            })
        })
        .field("ping", |t, p| {
            Box::pin(async move {
                t.pong.notify_one();
                t.ping.notified().await;
                Ok(p.resolve("ping").await)
            })
        })
        .field("pong", |t, p| {
            Box::pin(async move {
                t.ping.notify_one();
                t.pong.notified().await;
                Ok(p.resolve("pong").await)
            })
        })
        .field("children", |_, p| {
            Box::pin(async move {
                let children = (0..3)
                    .map(|_| TypedObject::new(Arc::new(Timeline::default()), &TIMELINE))
                    .collect::<Vec<_>>();
                Ok(p.resolve(children).await)
            })
        })
});

fn schema(timeline: &Arc<Timeline>) -> Operations {
    let root = || Arc::new(TypedObject::new(Arc::clone(timeline), &TIMELINE));
    Operations::new(root(), Some(root()), None)
}

fn mutation(selection_set: Vec<Selection>) -> Document {
    Document::default().operation(Operation::new(OperationType::Mutation, selection_set))
}

async fn run(operations: &Operations, doc: &Document) -> Value {
    let (value, errors) = operations
        .execute(RequestId::next(), doc, None, &Variables::default())
        .await
        .expect("Execution failed");
    assert_eq!(errors, []);
    value
}

#[tokio::test]
async fn output_follows_request_order_not_completion_order() {
    let timeline = Arc::new(Timeline::default());
    let doc = Document::query(vec![
        "slow".into(),
        Field::new("delayed").alias("b").argument("ms", 30).into(),
        Field::new("delayed").alias("a").argument("ms", 0).into(),
        "fast".into(),
        Field::new("delayed").alias("c").argument("ms", 10).into(),
    ]);

    let value = run(&schema(&timeline), &doc).await;

    assert_eq!(
        value,
        graphql_value!({"slow": "slow", "b": 30, "a": 0, "fast": "fast", "c": 10}),
    );
    assert_eq!(timeline.events(), ["fast", "slow"]);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"slow":"slow","b":30,"a":0,"fast":"fast","c":10}"#,
    );
}

#[tokio::test]
async fn sibling_fields_resolve_concurrently() {
    let timeline = Arc::new(Timeline::default());
    let doc = Document::query(vec!["ping".into(), "pong".into()]);
    let operations = schema(&timeline);

    // Each field waits for the other one to have started.
    let value = time::timeout(Duration::from_secs(5), run(&operations, &doc))
        .await
        .expect("sibling fields were not resolved concurrently");

    assert_eq!(value, graphql_value!({"ping": "ping", "pong": "pong"}));
}

#[tokio::test]
async fn list_items_resolve_concurrently_in_order() {
    let timeline = Arc::new(Timeline::default());
    let doc = Document::query(vec![
        Field::new("children")
            .select("ping")
            .select(Field::new("delayed").argument("ms", 5))
            .select("pong")
            .into(),
    ]);
    let operations = schema(&timeline);

    let value = time::timeout(Duration::from_secs(5), run(&operations, &doc))
        .await
        .expect("list items were not resolved concurrently");

    let child = graphql_value!({"ping": "ping", "delayed": 5, "pong": "pong"});
    assert_eq!(
        value,
        graphql_value!({"children": [child.clone(), child.clone(), child]}),
    );
}

#[tokio::test]
async fn mutation_root_fields_run_serially() {
    let timeline = Arc::new(Timeline::default());
    let doc = mutation(vec!["slow".into(), "fast".into()]);

    let value = run(&schema(&timeline), &doc).await;

    assert_eq!(value, graphql_value!({"slow": "slow", "fast": "fast"}));
    assert_eq!(timeline.events(), ["slow", "fast"]);
}

#[tokio::test]
async fn mutation_root_fields_never_overlap() {
    let timeline = Arc::new(Timeline::default());
    let doc = mutation(vec!["ping".into(), "pong".into()]);
    let operations = schema(&timeline);

    let result = time::timeout(Duration::from_millis(200), run(&operations, &doc)).await;

    assert!(result.is_err(), "`pong` started before `ping` completed");
}

#[tokio::test]
async fn nested_mutation_fields_resolve_concurrently() {
    let timeline = Arc::new(Timeline::default());
    let doc = mutation(vec![
        Field::new("children")
            .select("ping")
            .select("pong")
            .into(),
    ]);
    let operations = schema(&timeline);

    let value = time::timeout(Duration::from_secs(5), run(&operations, &doc))
        .await
        .expect("nested fields were not resolved concurrently");

    let child = graphql_value!({"ping": "ping", "pong": "pong"});
    assert_eq!(
        value,
        graphql_value!({"children": [child.clone(), child.clone(), child]}),
    );
}
