use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use tyson::{
    from_str, json, to_string, AdapterFactory, AdapterRef, Codec, CodecOptions, EnumConstant,
    EnumDescriptor, ErrorKind, FieldDescriptor, FieldNamingPolicy, JsonReader, JsonWriter,
    Modifiers, RecordDescriptor, Registry, Result, SkipFieldsNamed, SkipTypes, TypeAdapter,
    TypeCatalog, TypeSignature, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn point_catalog() -> TypeCatalog {
    TypeCatalog::new().with_record(
        RecordDescriptor::new("Point")
            .field(FieldDescriptor::new("foo", TypeSignature::i32()))
            .field(FieldDescriptor::new("bar", TypeSignature::i32())),
    )
}

fn codec(catalog: TypeCatalog) -> Codec {
    Codec::new(CodecOptions::new().with_catalog(catalog))
}

#[test]
fn test_two_field_record() {
    init_tracing();
    let codec = codec(point_catalog());
    let point = TypeSignature::plain("Point");
    let text = codec.to_string(&json!({"foo": 1, "bar": 2}), &point).unwrap();
    assert_eq!(text, r#"{"foo":1,"bar":2}"#);
    assert_eq!(codec.from_str(&text, &point).unwrap(), json!({"foo": 1, "bar": 2}));
}

#[test]
fn test_bitset_flag_forms() {
    let codec = Codec::default();
    let bits = TypeSignature::plain("bitset");
    let inputs = [
        "[1,0,1,1,1,1,0,0,1,0,0,0]",
        r#"["1","0","1","1","1","1","0","0","1"]"#,
        "[true,false,true,true,true,true,false,false,true,false,false]",
    ];
    for text in inputs {
        let value = codec.from_str(text, &bits).unwrap();
        let set: Vec<usize> = value.as_bits().unwrap().ones().collect();
        assert_eq!(set, vec![0, 2, 3, 4, 5, 8], "input {}", text);
        assert_eq!(codec.to_string(&value, &bits).unwrap(), "[1,0,1,1,1,1,0,0,1]");
    }
}

#[test]
fn test_parameterized_container_knows_its_elements() {
    let codec = Codec::default();
    let typed = TypeSignature::list_of(TypeSignature::i32());
    let raw = TypeSignature::plain("list");

    assert_eq!(codec.from_str(r#"["1", 2]"#, &typed).unwrap(), json!([1, 2]));
    assert_eq!(codec.from_str(r#"["1", 2]"#, &raw).unwrap(), json!(["1", 2]));

    let err = codec.from_str(r#"["x"]"#, &typed).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(!Arc::ptr_eq(
        &codec.registry().resolve(&typed).unwrap(),
        &codec.registry().resolve(&raw).unwrap()
    ));
}

#[test]
fn test_generic_record_resolves_type_parameters() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Page")
            .type_param("T")
            .field(FieldDescriptor::new("items", TypeSignature::list_of(TypeSignature::variable("T"))))
            .field(FieldDescriptor::new("next", TypeSignature::i32())),
    );
    let codec = codec(catalog);
    let ints = TypeSignature::parameterized("Page", vec![TypeSignature::i64()]);
    let strings = TypeSignature::parameterized("Page", vec![TypeSignature::string()]);
    let text = r#"{"items":["1","2"],"next":3}"#;

    assert_eq!(
        codec.from_str(text, &ints).unwrap(),
        json!({"items": [1, 2], "next": 3})
    );
    assert_eq!(
        codec.from_str(text, &strings).unwrap(),
        json!({"items": ["1", "2"], "next": 3})
    );

    // Raw use falls back to untyped elements.
    let raw = TypeSignature::plain("Page");
    assert_eq!(
        codec.from_str(text, &raw).unwrap(),
        json!({"items": ["1", "2"], "next": 3})
    );
}

#[test]
fn test_concurrent_resolution_agrees() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Tree")
            .field(FieldDescriptor::new("label", TypeSignature::string()))
            .field(FieldDescriptor::new(
                "children",
                TypeSignature::list_of(TypeSignature::plain("Tree")),
            )),
    );
    let codec = Arc::new(codec(catalog));
    let tree = TypeSignature::plain("Tree");
    let text = r#"{"label":"root","children":[{"label":"leaf","children":[]}]}"#;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let codec = Arc::clone(&codec);
            let tree = tree.clone();
            thread::spawn(move || {
                let adapter = codec.registry().resolve(&tree).unwrap();
                let value = adapter.read(&mut JsonReader::from_str(text)).unwrap();
                let mut out = JsonWriter::new(codec.options().writer_options());
                adapter.write(&mut out, &value).unwrap();
                out.finish().unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), text);
    }
}

#[test]
fn test_name_collision_fails_before_conversion() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Clash")
            .field(FieldDescriptor::new("first_name", TypeSignature::string()))
            .field(FieldDescriptor::new("firstName", TypeSignature::string())),
    );
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(catalog)
            .with_naming_policy(FieldNamingPolicy::LowerCamelCase),
    );
    let err = codec.adapter(&TypeSignature::plain("Clash")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_serialize_nulls_policy() {
    let value = json!({"foo": null, "bar": 2});
    let point = TypeSignature::plain("Point");

    let omit = codec(point_catalog());
    assert_eq!(omit.to_string(&value, &point).unwrap(), r#"{"bar":2}"#);

    let keep = Codec::new(
        CodecOptions::new()
            .with_catalog(point_catalog())
            .with_serialize_nulls(true),
    );
    assert_eq!(keep.to_string(&value, &point).unwrap(), r#"{"foo":null,"bar":2}"#);
}

#[test]
fn test_unknown_keys_ignored() {
    let codec = codec(point_catalog());
    let value = codec
        .from_str(
            r#"{"foo":1,"zzz":[{"a":null}],"bar":2,"other":"x"}"#,
            &TypeSignature::plain("Point"),
        )
        .unwrap();
    assert_eq!(value, json!({"foo": 1, "bar": 2}));
}

#[test]
fn test_lenient_tokens_need_lenient_mode() {
    let strict = Codec::default();
    let lenient = Codec::new(CodecOptions::new().with_lenient(true));
    let any = TypeSignature::any();

    for text in ["[NaN]", "['a']", "[bare]", "[1;2]", "{a:1}", "[1] // note"] {
        let err = strict.from_str(text, &any).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "strict accepted {}", text);
        assert!(lenient.from_str(text, &any).is_ok(), "lenient rejected {}", text);
    }
    assert_eq!(
        lenient.from_str("{a: 'x'; b = bare}", &any).unwrap(),
        json!({"a": "x", "b": "bare"})
    );
}

#[test]
fn test_excluded_fields_never_written() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Account")
            .field(FieldDescriptor::new("user", TypeSignature::string()))
            .field(
                FieldDescriptor::new("session", TypeSignature::string())
                    .modifiers(Modifiers::TRANSIENT),
            )
            .field(FieldDescriptor::new("password", TypeSignature::string()))
            .field(FieldDescriptor::new("since", TypeSignature::i32()).since(2.0)),
    );
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(catalog)
            .with_version(1.0)
            .with_exclusion_strategy(Arc::new(SkipFieldsNamed(vec!["password".to_string()]))),
    );
    let account = TypeSignature::plain("Account");
    let value = json!({"user": "ada", "session": "s", "password": "p", "since": 3});
    assert_eq!(codec.to_string(&value, &account).unwrap(), r#"{"user":"ada"}"#);

    let read = codec
        .from_str(r#"{"user":"ada","session":"s","password":"p","since":3}"#, &account)
        .unwrap();
    // Excluded fields keep their blank-instance defaults.
    assert_eq!(
        read,
        json!({"user": "ada", "session": null, "password": null, "since": null})
    );
}

#[test]
fn test_excluded_type_field_dropped() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Event")
            .field(FieldDescriptor::new("name", TypeSignature::string()))
            .field(FieldDescriptor::new("at", TypeSignature::plain("datetime"))),
    );
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(catalog)
            .with_exclusion_strategy(Arc::new(SkipTypes(vec!["datetime".to_string()]))),
    );
    let event = TypeSignature::plain("Event");
    let text = codec
        .to_string(&json!({"name": "launch", "at": "ignored"}), &event)
        .unwrap();
    assert_eq!(text, r#"{"name":"launch"}"#);
}

#[test]
fn test_expose_and_modifier_options() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Config")
            .field(FieldDescriptor::new("host", TypeSignature::string()).expose(true, true))
            .field(FieldDescriptor::new("token", TypeSignature::string()).expose(false, true))
            .field(FieldDescriptor::new("debug", TypeSignature::bool()))
            .field(
                FieldDescriptor::new("counter", TypeSignature::i32())
                    .modifiers(Modifiers::STATIC)
                    .expose(true, true),
            ),
    );
    let options = CodecOptions::new()
        .with_catalog(catalog)
        .with_exclude_fields_without_expose(true)
        .with_excluded_modifiers(Modifiers::TRANSIENT);
    let codec = Codec::new(options);
    let config = TypeSignature::plain("Config");

    let value = json!({"host": "h", "token": "t", "debug": true, "counter": 1});
    assert_eq!(
        codec.to_string(&value, &config).unwrap(),
        r#"{"host":"h","counter":1}"#
    );
    let read = codec
        .from_str(r#"{"host":"h","token":"t","debug":true}"#, &config)
        .unwrap();
    assert_eq!(
        read,
        json!({"host": "h", "token": "t", "debug": null, "counter": null})
    );
}

#[test]
fn test_inherited_fields_and_aliases() {
    let catalog = TypeCatalog::new()
        .with_record(
            RecordDescriptor::new("Entity")
                .field(FieldDescriptor::new("id", TypeSignature::i64()).alternate("ID")),
        )
        .with_record(
            RecordDescriptor::new("Customer")
                .extends(TypeSignature::plain("Entity"))
                .field(
                    FieldDescriptor::new("display_name", TypeSignature::string())
                        .named("name")
                        .alternate("displayName"),
                ),
        );
    let codec = codec(catalog);
    let customer = TypeSignature::plain("Customer");

    let value = codec
        .from_str(r#"{"displayName":"Ada","ID":7}"#, &customer)
        .unwrap();
    assert_eq!(value, json!({"id": 7, "display_name": "Ada"}));
    assert_eq!(
        codec.to_string(&value, &customer).unwrap(),
        r#"{"id":7,"name":"Ada"}"#
    );
}

#[test]
fn test_abstract_record_needs_instance_creator() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Shape")
            .abstract_record()
            .field(FieldDescriptor::new("sides", TypeSignature::i32())),
    );
    let shape = TypeSignature::plain("Shape");

    let err = codec(catalog.clone()).from_str(r#"{"sides":3}"#, &shape).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Instantiation);

    let codec = Codec::new(CodecOptions::new().with_catalog(catalog).with_instance_creator(
        "Shape",
        Arc::new(|_: &TypeSignature| json!({"sides": 0, "kind": "polygon"})),
    ));
    assert_eq!(
        codec.from_str(r#"{"sides":3}"#, &shape).unwrap(),
        json!({"sides": 3, "kind": "polygon"})
    );
}

#[test]
fn test_non_nullable_field_rejects_null() {
    let catalog = TypeCatalog::new().with_record(
        RecordDescriptor::new("Strict")
            .field(FieldDescriptor::new("n", TypeSignature::i32()).non_null()),
    );
    let codec = codec(catalog);
    let err = codec
        .from_str(r#"{"n":null}"#, &TypeSignature::plain("Strict"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

struct Upper;

impl TypeAdapter for Upper {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        out.value_str(&value.as_str().unwrap_or_default().to_uppercase())
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        input.next_string().map(|s| Value::String(s.to_lowercase()))
    }
}

#[test]
fn test_user_adapter_precedes_builtins() {
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(point_catalog())
            .with_type_adapter(TypeSignature::string(), Arc::new(Upper)),
    );
    let list = TypeSignature::list_of(TypeSignature::string());
    assert_eq!(
        codec.to_string(&json!(["a", null, "b"]), &list).unwrap(),
        r#"["A",null,"B"]"#
    );
    assert_eq!(codec.from_str(r#"["X"]"#, &list).unwrap(), json!(["x"]));
}

#[test]
fn test_hierarchy_adapter_covers_subtypes() {
    struct Tag;

    impl TypeAdapter for Tag {
        fn write(&self, out: &mut JsonWriter, _: &Value) -> Result<()> {
            out.value_str("animal")
        }

        fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
            input.skip_value()?;
            Ok(json!({}))
        }
    }

    let catalog = TypeCatalog::new()
        .with_record(RecordDescriptor::new("Animal"))
        .with_record(RecordDescriptor::new("Dog").extends(TypeSignature::plain("Animal")))
        .with_record(RecordDescriptor::new("Rock"));
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(catalog)
            .with_hierarchy_adapter("Animal", Arc::new(Tag)),
    );
    let dog = codec.to_string(&json!({}), &TypeSignature::plain("Dog")).unwrap();
    assert_eq!(dog, "\"animal\"");
    let rock = codec.to_string(&json!({}), &TypeSignature::plain("Rock")).unwrap();
    assert_eq!(rock, "{}");
}

struct Clamp;

impl AdapterFactory for Clamp {
    fn create(&self, registry: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        if *signature != TypeSignature::i32() {
            return Ok(None);
        }
        let default = registry.resolve_skipping(self, signature)?;
        Ok(Some(Arc::new(Clamped { default })))
    }
}

struct Clamped {
    default: AdapterRef,
}

impl TypeAdapter for Clamped {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        let clamped = value.as_i64().unwrap_or_default().clamp(0, 100);
        self.default.write(out, &Value::from(clamped))
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        self.default.read(input)
    }
}

#[test]
fn test_factory_delegates_to_default() {
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(point_catalog())
            .with_factory(Arc::new(Clamp)),
    );
    let text = codec
        .to_string(&json!({"foo": 500, "bar": 7}), &TypeSignature::plain("Point"))
        .unwrap();
    assert_eq!(text, r#"{"foo":100,"bar":7}"#);
}

#[test]
fn test_enums_by_name() {
    let catalog = TypeCatalog::new()
        .with_enum(
            EnumDescriptor::new("Level")
                .constants(&["Low", "High"])
                .constant(EnumConstant::new("Critical").named("crit")),
        )
        .with_record(
            RecordDescriptor::new("Alert")
                .field(FieldDescriptor::new("level", TypeSignature::plain("Level"))),
        );
    let codec = codec(catalog);
    let alert = TypeSignature::plain("Alert");
    assert_eq!(
        codec.to_string(&json!({"level": "Critical"}), &alert).unwrap(),
        r#"{"level":"crit"}"#
    );
    assert_eq!(
        codec.from_str(r#"{"level":"crit"}"#, &alert).unwrap(),
        json!({"level": "Critical"})
    );
    assert_eq!(
        codec.from_str(r#"{"level":"Medium"}"#, &alert).unwrap(),
        json!({"level": null})
    );
}

#[test]
fn test_dates_use_configured_pattern() {
    use chrono::{TimeZone, Utc};

    let codec = Codec::new(CodecOptions::new().with_date_pattern("%Y-%m-%d %H:%M:%S"));
    let date = TypeSignature::plain("datetime");
    let value = Value::Date(Utc.with_ymd_and_hms(2023, 12, 1, 8, 30, 0).unwrap());
    let text = codec.to_string(&value, &date).unwrap();
    assert_eq!(text, "\"2023-12-01 08:30:00\"");
    assert_eq!(codec.from_str(&text, &date).unwrap(), value);

    let bad = Codec::new(CodecOptions::new().with_date_pattern("%Y-%Q"));
    assert_eq!(bad.adapter(&date).unwrap_err().kind(), ErrorKind::Configuration);
}

#[test]
fn test_special_floats_policy() {
    let f64_sig = TypeSignature::f64();
    let nan = Value::from(f64::NAN);
    let err = Codec::default().to_string(&nan, &f64_sig).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);

    let codec = Codec::new(CodecOptions::new().with_serialize_special_floats(true));
    assert_eq!(codec.to_string(&nan, &f64_sig).unwrap(), "NaN");
    assert_eq!(
        codec.to_string(&Value::from(f64::NEG_INFINITY), &f64_sig).unwrap(),
        "-Infinity"
    );
}

#[test]
fn test_html_safe_output() {
    let codec = Codec::new(CodecOptions::new().with_html_safe(true));
    let text = codec
        .to_string(&json!("<a href='x'>"), &TypeSignature::string())
        .unwrap();
    assert_eq!(text, r#""\u003ca href\u003d\u0027x\u0027\u003e""#);
}

#[test]
fn test_map_signature_with_integer_keys() {
    let codec = Codec::default();
    let sig = TypeSignature::map_of(
        TypeSignature::i32(),
        TypeSignature::list_of(TypeSignature::bool()),
    );
    let value = codec.from_str(r#"{"1":[true],"2":["TRUE",false]}"#, &sig).unwrap();
    assert_eq!(value, json!({"1": [true], "2": [true, false]}));
    assert_eq!(
        codec.to_string(&value, &sig).unwrap(),
        r#"{"1":[true],"2":[true,false]}"#
    );
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    id: u32,
    lines: Vec<Line>,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Line {
    sku: String,
    quantity: u16,
}

#[test]
fn test_serde_types_through_records() {
    let catalog = TypeCatalog::new()
        .with_record(
            RecordDescriptor::new("Order")
                .field(FieldDescriptor::new("id", TypeSignature::plain("u32")))
                .field(FieldDescriptor::new(
                    "lines",
                    TypeSignature::list_of(TypeSignature::plain("Line")),
                ))
                .field(FieldDescriptor::new("note", TypeSignature::string())),
        )
        .with_record(
            RecordDescriptor::new("Line")
                .field(FieldDescriptor::new("sku", TypeSignature::string()))
                .field(FieldDescriptor::new("quantity", TypeSignature::plain("u16"))),
        );
    let codec = Codec::new(
        CodecOptions::new()
            .with_catalog(catalog)
            .with_naming_policy(FieldNamingPolicy::UpperCamelCase),
    );
    let order = Order {
        id: 9,
        lines: vec![Line {
            sku: "A-1".to_string(),
            quantity: 2,
        }],
        note: None,
    };
    let sig = TypeSignature::plain("Order");
    let text = codec.to_string_typed(&order, &sig).unwrap();
    assert_eq!(text, r#"{"Id":9,"Lines":[{"Sku":"A-1","Quantity":2}]}"#);
    let back: Order = codec.from_str_typed(&text, &sig).unwrap();
    assert_eq!(back, order);
}

#[test]
fn test_untyped_round_trip_keeps_nulls_and_order() {
    let text = r#"{"z":null,"a":[1,-2.5,"s",{}],"m":true}"#;
    let value = from_str(text).unwrap();
    assert_eq!(to_string(&value).unwrap(), text);
}

#[test]
fn test_error_carries_path() {
    let codec = codec(point_catalog());
    let list = TypeSignature::list_of(TypeSignature::plain("Point"));
    let err = codec
        .from_str(r#"[{"foo":1},{"foo":"one"}]"#, &list)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.to_string().contains("$[1].foo"), "{}", err);
}
