use jitsig_model::{
    modifiers, ClassProvider, ClassStub, MemoryTypeOracle, MethodStub, TypeOracle,
};
use pretty_assertions::assert_eq;

const FIXTURE: &str = r#"
[
  {
    "binary_name": "com.example.Shape",
    "access_flags": 1537,
    "interfaces": []
  },
  {
    "binary_name": "com.example.Circle",
    "super_binary_name": "java.lang.Object",
    "interfaces": ["com.example.Shape"],
    "methods": [
      { "name": "area", "descriptor": "()D", "access_flags": 1 },
      { "name": "scale", "descriptor": "([D)V", "access_flags": 129 }
    ]
  }
]
"#;

fn oracle_with_fixture() -> MemoryTypeOracle {
    let stubs: Vec<ClassStub> = serde_json::from_str(FIXTURE).expect("fixture should parse");
    let mut oracle = MemoryTypeOracle::with_minimal_jdk();
    for stub in stubs {
        oracle.add_class(stub);
    }
    oracle
}

#[test]
fn json_stubs_fill_in_defaults() {
    let oracle = oracle_with_fixture();
    let shape = oracle.lookup_class("com.example.Shape").unwrap();
    assert_eq!(shape.super_binary_name, None);
    assert!(shape.methods.is_empty());
    assert_ne!(shape.access_flags & modifiers::ACC_INTERFACE, 0);

    let circle = oracle.lookup_class("com.example.Circle").unwrap();
    assert_eq!(
        circle.methods[1],
        MethodStub {
            name: "scale".to_string(),
            descriptor: "([D)V".to_string(),
            access_flags: modifiers::ACC_PUBLIC | modifiers::ACC_VARARGS,
        }
    );
}

#[test]
fn fixture_classes_take_part_in_assignability() {
    let oracle = oracle_with_fixture();
    let circle = oracle.resolve("com/example/Circle").unwrap();
    let shape = oracle.resolve("com.example.Shape").unwrap();
    let shapes = oracle.resolve("[Lcom.example.Shape;").unwrap();
    let circles = oracle.resolve("com.example.Circle[]").unwrap();

    assert!(oracle.is_assignable(&circle, &shape));
    assert!(!oracle.is_assignable(&shape, &circle));
    assert!(oracle.is_assignable(&circles, &shapes));
}

#[test]
fn re_adding_a_stub_replaces_it() {
    let mut oracle = oracle_with_fixture();
    oracle.add_class(ClassStub::new("com.example.Circle").with_method("area", "()F", 1));
    let circle = oracle.lookup_class("com.example.Circle").unwrap();
    assert_eq!(circle.methods.len(), 1);
    assert!(circle.interfaces.is_empty());
}
