use bridge_core::{FunctionData, RecordData, TypeData, TypeId, TypeRegistry};

use super::*;
use crate::test_utils::signatures;

fn string(registry: &TypeRegistry) -> TypeId {
    registry.get_type("", "string").unwrap()
}

/// User{Name string}, SaveUserRequest{U *User}, SaveUser(SaveUserRequest) error
fn save_user(registry: &mut TypeRegistry) -> TypeId {
    let string = string(registry);
    let error = registry.get_type("", "error").unwrap();
    let user = registry.placeholder("", "User");
    let ptr = registry.alloc(TypeData::Reference(user));
    let request = registry
        .define(
            "",
            "SaveUserRequest",
            TypeData::Record(RecordData::named("", "SaveUserRequest").with_field("U", ptr)),
        )
        .unwrap();
    registry
        .define(
            "",
            "User",
            TypeData::Record(RecordData::named("", "User").with_field("Name", string)),
        )
        .unwrap();
    registry.alloc(TypeData::Function(FunctionData::new(
        vec![request],
        vec![error],
    )))
}

#[test]
fn save_user_inputs() {
    let mut registry = TypeRegistry::go_builtins();
    let func = save_user(&mut registry);
    let inputs = registry.function(func).unwrap().inputs.clone();

    let found = closure(&registry, inputs);

    assert_eq!(signatures(&registry, &found), ["SaveUserRequest", "User"]);
}

#[test]
fn self_reference_collects_once() {
    let mut registry = TypeRegistry::go_builtins();
    let node = registry.placeholder("", "Node");
    let next = registry.alloc(TypeData::Reference(node));
    registry
        .define(
            "",
            "Node",
            TypeData::Record(RecordData::named("", "Node").with_field("Next", next)),
        )
        .unwrap();

    let found = closure(&registry, [node]);

    assert_eq!(found, [node]);
}

#[test]
fn mutual_recursion_terminates() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let a = registry.placeholder("app", "A");
    let b = registry.placeholder("app", "B");
    let list_b = registry.alloc(TypeData::List(b));
    let map_a = registry.alloc(TypeData::Map {
        key: string,
        value: a,
    });
    registry
        .define(
            "app",
            "A",
            TypeData::Record(RecordData::named("app", "A").with_field("Bs", list_b)),
        )
        .unwrap();
    registry
        .define(
            "app",
            "B",
            TypeData::Record(RecordData::named("app", "B").with_field("As", map_a)),
        )
        .unwrap();

    let found = closure(&registry, [a]);

    assert_eq!(
        signatures(&registry, &found),
        ["app.A", "[]app.B", "app.B", "map[string]app.A"]
    );
}

#[test]
fn structural_duplicates_collapse() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let first = registry.alloc(TypeData::List(string));
    let second = registry.alloc(TypeData::List(string));
    let holder = registry
        .define(
            "",
            "Holder",
            TypeData::Record(
                RecordData::named("", "Holder")
                    .with_field("A", first)
                    .with_field("B", second),
            ),
        )
        .unwrap();

    let found = closure(&registry, [holder]);

    assert_eq!(found, [holder, first]);
}

#[test]
fn leaves_are_not_collected() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let pending = registry.placeholder("app", "Missing");
    let null = registry.alloc(TypeData::Null);

    let found = closure(&registry, [string, pending, null]);

    assert!(found.is_empty());
}

#[test]
fn functions_traversed_not_collected() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let list = registry.alloc(TypeData::List(string));
    let func = registry.alloc(TypeData::Function(FunctionData::new(vec![list], vec![])));

    let found = closure(&registry, [func]);

    assert_eq!(found, [list]);
}

#[test]
fn tuples_are_collected() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let list = registry.alloc(TypeData::List(string));
    let tuple = registry.alloc(TypeData::Tuple(vec![string, list]));

    let found = closure(&registry, [tuple]);

    assert_eq!(found, [tuple, list]);
}

#[test]
fn bases_before_fields() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let list = registry.alloc(TypeData::List(string));
    let base = registry
        .define(
            "",
            "Base",
            TypeData::Record(RecordData::named("", "Base").with_field("Id", string)),
        )
        .unwrap();
    let derived = registry
        .define(
            "",
            "Derived",
            TypeData::Record(
                RecordData::named("", "Derived")
                    .with_field("Tags", list)
                    .with_base(base),
            ),
        )
        .unwrap();

    let found = closure(&registry, [derived]);

    assert_eq!(found, [derived, base, list]);
}

#[test]
fn collect_references_config() {
    let mut registry = TypeRegistry::go_builtins();
    let func = save_user(&mut registry);
    let inputs = registry.function(func).unwrap().inputs.clone();
    let config = ClosureConfig::new().collect_references(true);

    let found = ClosureCollector::new(&registry, config).collect(inputs);

    assert_eq!(
        signatures(&registry, &found),
        ["SaveUserRequest", "*User", "User"]
    );
}

#[test]
fn waves_only_return_new_entries() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let list = registry.alloc(TypeData::List(string));
    let map = registry.alloc(TypeData::Map {
        key: string,
        value: list,
    });
    let mut collector = ClosureCollector::new(&registry, ClosureConfig::default());

    collector.mark([list]);
    assert_eq!(collector.take_wave(), [list]);

    collector.mark([list, map]);
    assert_eq!(collector.take_wave(), [map]);

    assert!(collector.take_wave().is_empty());
    assert_eq!(collector.all(), [list, map]);
    assert!(collector.contains(string));
}

#[test]
fn reset_forgets_everything() {
    let mut registry = TypeRegistry::go_builtins();
    let string = string(&registry);
    let list = registry.alloc(TypeData::List(string));
    let mut collector = ClosureCollector::new(&registry, ClosureConfig::default());

    collector.collect([list]);
    collector.reset();

    assert!(collector.all().is_empty());
    assert!(!collector.contains(list));
    assert_eq!(collector.collect([list]), [list]);
}
