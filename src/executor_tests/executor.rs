mod field_execution {
    use std::sync::{Arc, LazyLock};

    use pretty_assertions::assert_eq;

    use crate::{
        ast::{Document, Field, InputValue, Variables},
        executor::{ExecutionError, FieldError, PathSegment, RequestId},
        graphql_value,
        schema::model::Operations,
        types::base::{Resolvers, TypedObject},
    };

    struct DataType;
    struct DeepDataType;

    static DATA_TYPE: LazyLock<Resolvers<DataType>> = LazyLock::new(|| {
        Resolvers::<DataType>::new("DataType")
            .field("a", |_, p| Box::pin(async move { Ok(p.resolve("Apple").await) }))
            .field("b", |_, p| Box::pin(async move { Ok(p.resolve("Banana").await) }))
            .field("c", |_, p| Box::pin(async move { Ok(p.resolve("Cookie").await) }))
            .field("pic", |_, p| {
                Box::pin(async move {
                    let size = p.argument::<Option<i32>>("size")?;
                    Ok(p.resolve(format!("Pic of size: {}", size.unwrap_or(50))).await)
                })
            })
            .field("deep", |_, p| {
                Box::pin(async move {
                    Ok(p.resolve(TypedObject::new(Arc::new(DeepDataType), &DEEP_DATA_TYPE)).await)
                })
            })
    });

    static DEEP_DATA_TYPE: LazyLock<Resolvers<DeepDataType>> = LazyLock::new(|| {
        Resolvers::<DeepDataType>::new("DeepDataType")
            .field("a", |_, p| {
                Box::pin(async move { Ok(p.resolve("Already Been Done").await) })
            })
            .field("c", |_, p| {
                Box::pin(async move {
                    Ok(p.resolve(vec![Some("Contrived"), None, Some("Confusing")]).await)
                })
            })
            .field("deeper", |_, p| {
                Box::pin(async move {
                    let data = || Some(TypedObject::new(Arc::new(DataType), &DATA_TYPE));
                    Ok(p.resolve(vec![data(), None, data()]).await)
                })
            })
    });

    fn schema() -> Operations {
        Operations::new(Arc::new(TypedObject::new(Arc::new(DataType), &DATA_TYPE)), None, None)
    }

    #[tokio::test]
    async fn test() {
        let doc = Document::query(vec![
            "a".into(),
            Field::new("b").alias("bAlias").into(),
            Field::new("pic").alias("x").argument("size", 100).into(),
            Field::new("pic").alias("y").into(),
            Field::new("deep")
                .select("a")
                .select("c")
                .select(Field::new("deeper").select("a").select("b"))
                .into(),
        ]);

        let result = schema()
            .execute(RequestId::next(), &doc, None, &Variables::default())
            .await;

        assert_eq!(
            result,
            Ok((
                graphql_value!({
                    "a": "Apple",
                    "bAlias": "Banana",
                    "x": "Pic of size: 100",
                    "y": "Pic of size: 50",
                    "deep": {
                        "a": "Already Been Done",
                        "c": ["Contrived", null, "Confusing"],
                        "deeper": [
                            {"a": "Apple", "b": "Banana"},
                            null,
                            {"a": "Apple", "b": "Banana"},
                        ],
                    },
                }),
                vec![],
            )),
        );
    }

    #[tokio::test]
    async fn unknown_field_is_a_field_error() {
        let doc = Document::query(vec![
            "a".into(),
            Field::new("deep").select("nope").select("a").into(),
        ]);

        let result = schema()
            .execute(RequestId::next(), &doc, None, &Variables::default())
            .await;

        assert_eq!(
            result,
            Ok((
                graphql_value!({
                    "a": "Apple",
                    "deep": {"nope": null, "a": "Already Been Done"},
                }),
                vec![ExecutionError::new(
                    vec![
                        PathSegment::Field("deep".into()),
                        PathSegment::Field("nope".into()),
                    ],
                    FieldError::from("Unknown field \"nope\" on type \"DeepDataType\""),
                )],
            )),
        );
    }

    #[tokio::test]
    async fn invalid_argument_names_the_argument() {
        let doc = Document::query(vec![
            Field::new("pic").argument("size", "big").into(),
            "c".into(),
        ]);

        let (value, errors) = schema()
            .execute(RequestId::next(), &doc, None, &Variables::default())
            .await
            .unwrap();

        assert_eq!(value, graphql_value!({"pic": null, "c": "Cookie"}));
        assert_eq!(
            errors,
            vec![ExecutionError::new(
                vec![PathSegment::Field("pic".into())],
                FieldError::from("Invalid argument \"size\": Expected Int, found String"),
            )],
        );
    }

    #[tokio::test]
    async fn unset_variable_reads_as_null() {
        let doc = Document::query(vec![
            Field::new("pic")
                .argument("size", InputValue::variable("size"))
                .into(),
        ]);

        assert_eq!(
            schema()
                .execute(RequestId::next(), &doc, None, &Variables::default())
                .await,
            Ok((graphql_value!({"pic": "Pic of size: 50"}), vec![])),
        );
    }

    #[tokio::test]
    async fn duplicate_input_member_is_a_field_error() {
        let doc = Document::query(vec![
            Field::new("pic")
                .argument("size", InputValue::object([("w", 1.into()), ("w", 2.into())]))
                .into(),
            "a".into(),
        ]);

        assert_eq!(
            schema()
                .execute(RequestId::next(), &doc, None, &Variables::default())
                .await,
            Ok((
                graphql_value!({"pic": null, "a": "Apple"}),
                vec![ExecutionError::new(
                    vec![PathSegment::Field("pic".into())],
                    FieldError::from("Duplicate Map member \"w\""),
                )],
            )),
        );
    }
}

mod absent_and_null {
    use std::sync::{Arc, LazyLock};

    use pretty_assertions::assert_eq;

    use crate::{
        ast::{Document, Variables},
        executor::RequestId,
        graphql_value,
        schema::model::Operations,
        types::base::{Resolvers, TypedObject},
    };

    struct Profile {
        name: String,
        nickname: Option<String>,
    }

    static PROFILE: LazyLock<Resolvers<Profile>> = LazyLock::new(|| {
        Resolvers::<Profile>::new("Profile")
            .field("name", |o, p| Box::pin(async move { Ok(p.resolve(o.name.as_str()).await) }))
            .field("nickname", |o, p| {
                Box::pin(async move { Ok(p.resolve(o.nickname.clone()).await) })
            })
    });

    #[tokio::test]
    async fn declared_but_absent_is_null_and_unrequested_is_missing() {
        let profile = Profile {
            name: "Ada".into(),
            nickname: None,
        };
        let schema = Operations::new(
            Arc::new(TypedObject::new(Arc::new(profile), &PROFILE)),
            None,
            None,
        );
        let doc = Document::query(vec!["nickname".into()]);

        let (value, errors) = schema
            .execute(RequestId::next(), &doc, None, &Variables::default())
            .await
            .unwrap();

        assert!(errors.is_empty());
        assert_eq!(value, graphql_value!({"nickname": null}));
        assert_eq!(value.find("nickname"), Ok(Some(&graphql_value!(null))));
        assert_eq!(value.find("name"), Ok(None));
    }
}

mod error_paths {
    use std::sync::{Arc, LazyLock};

    use pretty_assertions::assert_eq;

    use crate::{
        ast::{Document, Field, Variables},
        executor::{ExecutionError, FieldError, PathSegment, RequestId},
        graphql_value,
        schema::model::Operations,
        types::base::{Resolvers, TypedObject},
    };

    struct Inventory;

    struct Item {
        n: i32,
    }

    static INVENTORY: LazyLock<Resolvers<Inventory>> = LazyLock::new(|| {
        Resolvers::<Inventory>::new("Inventory")
            .field("items", |_, p| {
                Box::pin(async move {
                    let items = (0..4)
                        .map(|n| TypedObject::new(Arc::new(Item { n }), &ITEM))
                        .collect::<Vec<_>>();
                    Ok(p.resolve(items).await)
                })
            })
            .field("total", |_, p| Box::pin(async move { Ok(p.resolve(4).await) }))
    });

    static ITEM: LazyLock<Resolvers<Item>> = LazyLock::new(|| {
        Resolvers::<Item>::new("Item")
            .field("n", |i, p| Box::pin(async move { Ok(p.resolve(i.n).await) }))
            .field("stock", |i, p| {
                Box::pin(async move {
                    if i.n % 2 == 0 {
                        Err(FieldError::new(
                            "Out of stock",
                            graphql_value!({"item": i.n}),
                        ))
                    } else {
                        Ok(p.resolve(i.n * 10).await)
                    }
                })
            })
    });

    #[tokio::test]
    async fn failed_list_items_report_indexed_paths() {
        let schema = Operations::new(
            Arc::new(TypedObject::new(Arc::new(Inventory), &INVENTORY)),
            None,
            None,
        );
        let doc = Document::query(vec![
            Field::new("items").select("n").select("stock").into(),
            "total".into(),
        ]);

        let (value, errors) = schema
            .execute(RequestId::next(), &doc, None, &Variables::default())
            .await
            .unwrap();

        assert_eq!(
            value,
            graphql_value!({
                "items": [
                    {"n": 0, "stock": null},
                    {"n": 1, "stock": 10},
                    {"n": 2, "stock": null},
                    {"n": 3, "stock": 30},
                ],
                "total": 4,
            }),
        );
        let path = |index| {
            vec![
                PathSegment::Field("items".into()),
                PathSegment::Index(index),
                PathSegment::Field("stock".into()),
            ]
        };
        assert_eq!(
            errors,
            vec![
                ExecutionError::new(
                    path(0),
                    FieldError::new("Out of stock", graphql_value!({"item": 0})),
                ),
                ExecutionError::new(
                    path(2),
                    FieldError::new("Out of stock", graphql_value!({"item": 2})),
                ),
            ],
        );
    }
}

mod operation_selection {
    use std::sync::{Arc, LazyLock};

    use pretty_assertions::assert_eq;

    use crate::{
        GraphQLError,
        ast::{Document, Field, Operation, OperationType, Variables},
        executor::{RequestId, get_operation},
        graphql_value,
        schema::model::Operations,
        types::base::{Resolvers, TypedObject},
    };

    struct Root;

    static ROOT: LazyLock<Resolvers<Root>> = LazyLock::new(|| {
        Resolvers::<Root>::new("Root")
            .field("name", |_, p| Box::pin(async move { Ok(p.resolve(p.field_name()).await) }))
    });

    fn named(name: &str, alias: &str) -> Operation {
        Operation::new(OperationType::Query, vec![Field::new("name").alias(alias).into()])
            .named(name)
    }

    #[tokio::test]
    async fn selects_the_named_operation() {
        let schema = Operations::new(Arc::new(TypedObject::new(Arc::new(Root), &ROOT)), None, None);
        let doc = Document::default()
            .operation(named("A", "fromA"))
            .operation(named("B", "fromB"));

        assert_eq!(
            schema
                .execute(RequestId::next(), &doc, Some("B"), &Variables::default())
                .await,
            Ok((graphql_value!({"fromB": "name"}), vec![])),
        );
        assert_eq!(
            schema
                .execute(RequestId::next(), &doc, None, &Variables::default())
                .await,
            Err(GraphQLError::MultipleOperationsProvided),
        );
        assert_eq!(
            schema
                .execute(RequestId::next(), &doc, Some("C"), &Variables::default())
                .await,
            Err(GraphQLError::UnknownOperationName),
        );
    }

    #[test]
    fn single_operation_needs_no_name() {
        let doc = Document::default().operation(named("A", "a"));

        assert_eq!(get_operation(&doc, None).map(|o| o.name.as_deref()), Ok(Some("A")));
        assert_eq!(
            get_operation(&Document::default(), None),
            Err(GraphQLError::NoOperationProvided),
        );
        assert_eq!(
            get_operation(&Document::default(), Some("A")),
            Err(GraphQLError::NoOperationProvided),
        );
    }
}

mod request_context {
    use std::sync::{Arc, LazyLock, Mutex, PoisonError};

    use pretty_assertions::assert_eq;

    use crate::{
        BoxFuture,
        ast::{Document, Field, Variables},
        executor::{ExecutionResult, RequestId, ResolverParams},
        schema::model::Operations,
        types::base::{ObjectResolver, Resolvers, TypedObject},
    };

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(RequestId, String, String)>>,
    }

    impl Recorder {
        fn record(&self, request_id: RequestId, parent_type: &str, field_name: &str) {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((request_id, parent_type.into(), field_name.into()));
        }
    }

    static RECORDER: LazyLock<Resolvers<Recorder>> = LazyLock::new(|| {
        Resolvers::<Recorder>::new("Recorder")
            .field("leaf", |r, p| {
                Box::pin(async move {
                    r.record(p.request_id(), p.parent_type(), p.field_name());
                    Ok(p.resolve(true).await)
                })
            })
            .field("child", |r, p| {
                Box::pin(async move {
                    r.record(p.request_id(), p.parent_type(), p.field_name());
                    Ok(p.resolve(r).await)
                })
            })
    });

    // Lets `child` hand out a plain reference to the recorder.
    impl ObjectResolver for Recorder {
        fn type_name(&self) -> &str {
            RECORDER.type_name()
        }

        fn resolve_field<'a>(
            &'a self,
            params: ResolverParams<'a>,
        ) -> BoxFuture<'a, ExecutionResult> {
            RECORDER.dispatch(self, params)
        }
    }

    #[tokio::test]
    async fn request_id_reaches_every_resolver() {
        let recorder = Arc::new(Recorder::default());
        let schema = Operations::new(
            Arc::new(TypedObject::new(recorder.clone(), &RECORDER)),
            None,
            None,
        );
        let doc = Document::query(vec![
            Field::new("child").select("leaf").into(),
            "leaf".into(),
        ]);
        let request_id = RequestId::next();

        let (_, errors) = schema
            .execute(request_id, &doc, None, &Variables::default())
            .await
            .unwrap();

        assert!(errors.is_empty());
        let mut seen = recorder
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        seen.sort_by(|a, b| a.2.cmp(&b.2));
        assert_eq!(
            seen,
            vec![
                (request_id, "Recorder".into(), "child".into()),
                (request_id, "Recorder".into(), "leaf".into()),
                (request_id, "Recorder".into(), "leaf".into()),
            ],
        );
    }
}
