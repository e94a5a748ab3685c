//! End-to-end checks over derived beans: descriptors, plans, invocation and
//! the plan cache.
#![allow(dead_code, reason = "fixture members are reached through plans")]

use alloc::sync::Arc;
use core::any::TypeId;
use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;
use std::sync::Barrier;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::derive::{Bean, bean_interface, bean_methods};
use crate::info::{
    FieldDecl, MethodDecl, NonGenericShapeCell, ShapeKind, TypeRef, TypeShape, ValueType,
    Visibility,
};
use crate::plan::plan_type;
use crate::{
    AccessError, EntryKind, Introspect, PlanCache, PlanError, PlannerConfig, SerializationPlan,
    impl_opaque, plan_of,
};

// -----------------------------------------------------------------------------
// Fixture

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum JavaEnum {
    #[default]
    One,
    Two,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct JavaClassWithInterface {
    value: String,
}

#[bean_interface(name = "ComplexJavaInterface")]
trait ComplexInterface {
    fn get_name(&self) -> String;

    /// Never overridden by `JavaBean`, so it has no readable path.
    fn get_java_interface(&self) -> Option<String> {
        None
    }

    #[bean(marker = "XmlTransient")]
    fn get_shadowed_interface_method(&self) -> String;
}

#[derive(Bean, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[bean(implements(dyn ComplexInterface))]
struct JavaBean {
    name: String,
    number: i32,
    bool: Option<bool>,
    java_enum: JavaEnum,

    children: Vec<JavaBean>,
    list: Vec<String>,
    list_without_setter: Vec<String>,

    java_class_with_interface: JavaClassWithInterface,

    #[bean(marker = "Transient")]
    ignored_transient_annotation_field: String,
    #[bean(marker = "XmlTransient")]
    ignored_xml_transient_annotation_field: String,
    #[bean(transient)]
    ignored_transient_field: String,

    shadowed_interface_method: String,
}

#[bean_methods]
impl JavaBean {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_name(&mut self, value: String) {
        self.name = value;
    }

    pub fn get_number(&self) -> i32 {
        self.number
    }

    pub fn set_number(&mut self, value: i32) {
        self.number = value;
    }

    pub fn is_bool(&self) -> Option<bool> {
        self.bool
    }

    pub fn set_bool(&mut self, value: Option<bool>) {
        self.bool = value;
    }

    pub fn get_java_enum(&self) -> JavaEnum {
        self.java_enum
    }

    pub fn set_java_enum(&mut self, value: JavaEnum) {
        self.java_enum = value;
    }

    pub fn get_children(&self) -> &[JavaBean] {
        &self.children
    }

    pub fn set_children(&mut self, value: Vec<JavaBean>) {
        self.children = value;
    }

    pub fn get_list(&self) -> &Vec<String> {
        &self.list
    }

    pub fn set_list(&mut self, value: &[String]) {
        self.list = value.to_vec();
    }

    pub fn get_list_without_setter(&self) -> Vec<String> {
        self.list_without_setter.clone()
    }

    pub fn set_java_class_with_interface(&mut self, value: JavaClassWithInterface) {
        self.java_class_with_interface = value;
    }

    pub fn get_java_class_with_interface(&self) -> &JavaClassWithInterface {
        &self.java_class_with_interface
    }

    #[bean(marker = "Transient")]
    pub(crate) fn get_ignored_transient_annotation_field(&self) -> &str {
        &self.ignored_transient_annotation_field
    }

    #[bean(marker = "Transient")]
    pub(crate) fn set_ignored_transient_annotation_field(&mut self, value: String) {
        self.ignored_transient_annotation_field = value;
    }

    #[bean(marker = "XmlTransient")]
    pub fn get_ignored_xml_transient_annotation_field(&self) -> &str {
        &self.ignored_xml_transient_annotation_field
    }

    #[bean(marker = "XmlTransient")]
    pub fn set_ignored_xml_transient_annotation_field(&mut self, value: String) {
        self.ignored_xml_transient_annotation_field = value;
    }

    #[bean(transient)]
    pub fn get_ignored_transient_field(&self) -> &str {
        &self.ignored_transient_field
    }

    #[bean(transient)]
    pub fn set_ignored_transient_field(&mut self, value: String) {
        self.ignored_transient_field = value;
    }

    pub fn set_shadowed_interface_method(&mut self, value: String) {
        self.shadowed_interface_method = value;
    }

    pub fn set_pair(&mut self, first: String, second: String) {
        self.name = first + &second;
    }

    pub fn set_write_only(&mut self, value: String) {
        self.name = value;
    }

    pub fn compute(&self) -> usize {
        self.children.len()
    }
}

#[bean_methods]
impl ComplexInterface for JavaBean {
    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn get_shadowed_interface_method(&self) -> String {
        self.shadowed_interface_method.clone()
    }
}

const JAVA_BEAN_PROPERTIES: [&str; 9] = [
    "name",
    "number",
    "bool",
    "java_enum",
    "children",
    "list",
    "list_without_setter",
    "java_class_with_interface",
    "shadowed_interface_method",
];

#[derive(Bean, Default)]
struct User {
    pub id: u64,
    name: String,
}

#[bean_methods]
impl User {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.into();
    }
}

#[derive(Bean, Default)]
#[bean(name = "Administrator")]
struct Admin {
    #[bean(extends)]
    user: User,
    pub level: u8,
}

#[derive(Bean, Serialize)]
struct Token {
    pub value: String,
    #[serde(skip)]
    pub secret: String,
    pub raw: &'static str,
}

#[derive(Bean)]
struct Gauge {
    level: u32,
}

#[bean_methods]
impl Gauge {
    pub fn get_level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: String) {
        self.level = level.len() as u32;
    }
}

struct Handle;
impl_opaque!(Handle);

#[derive(Bean)]
struct Session {
    #[bean(extends)]
    handle: Handle,
    pub id: u32,
}

// Methods whose signatures cannot be named outside their impl.
#[derive(Bean, Default)]
struct Widget {
    pub label: String,
}

#[bean_methods]
impl Widget {
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.label = title.into();
    }

    pub fn get_parsed<T: core::str::FromStr>(&self) -> Option<T> {
        self.label.parse().ok()
    }

    pub fn get_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.label.chars()
    }

    pub fn set_bytes<const N: usize>(&mut self, bytes: [u8; N]) {
        self.label = String::from_utf8_lossy(&bytes).into_owned();
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }
}

#[derive(Bean, Default)]
struct Countdown {
    pub remaining: u8,
}

#[bean_methods]
impl Iterator for Countdown {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.checked_sub(1)?;
        Some(self.remaining)
    }
}

trait Gauged {
    type Reading;

    fn get_reading(&self) -> Self::Reading;
}

#[bean_methods]
impl Gauged for Countdown {
    type Reading = u16;

    fn get_reading(&self) -> Self::Reading {
        u16::from(self.remaining) * 10
    }
}

#[bean_interface]
trait Shaped {
    fn get_sides(&self) -> u8;

    fn get_scaled<T: From<u8>>(&self) -> T
    where
        Self: Sized;

    fn get_copy(&self) -> Self
    where
        Self: Sized;

    fn get_twin(&self) -> Option<Box<Self>>
    where
        Self: Sized;
}

// Counts every shape lookup a build performs.
struct Counted;

static COUNTED_SHAPE_CALLS: AtomicUsize = AtomicUsize::new(0);

impl Introspect for Counted {
    fn type_shape() -> &'static TypeShape {
        static CELL: NonGenericShapeCell = NonGenericShapeCell::new();
        COUNTED_SHAPE_CALLS.fetch_add(1, Ordering::SeqCst);
        // Keeps overlapping builders overlapped.
        thread::sleep(Duration::from_millis(2));
        CELL.get_or_init(|| {
            TypeShape::class::<Counted>("Counted")
                .with_fields(vec![FieldDecl::new("id", ValueType::new::<u32>("u32"))])
        })
    }
}

fn sample() -> JavaBean {
    JavaBean {
        number: 7,
        bool: Some(true),
        java_enum: JavaEnum::Two,
        list: vec!["a".into()],
        java_class_with_interface: JavaClassWithInterface { value: "x".into() },
        shadowed_interface_method: "shadow".into(),
        ignored_transient_field: "hidden".into(),
        ..JavaBean::new("bean")
    }
}

fn json(plan: &SerializationPlan, value: &dyn core::any::Any) -> String {
    serde_json::to_string(&plan.view(value)).unwrap()
}

// -----------------------------------------------------------------------------
// Descriptors

#[test]
fn derived_shapes() {
    let shape = JavaBean::type_shape();
    assert_eq!(shape.name(), "JavaBean");
    assert_eq!(shape.kind(), ShapeKind::Class);
    assert_eq!(shape.fields().len(), 12);
    assert_eq!(shape.interfaces()[0].name(), "ComplexJavaInterface");
    assert!(shape.super_edge().is_none());

    let transient = shape.field("ignored_transient_field").unwrap();
    assert!(transient.is_transient());
    assert!(transient.reader().is_none());
    let marked = shape.field("ignored_xml_transient_annotation_field").unwrap();
    assert_eq!(marked.annotations(), ["XmlTransient"]);

    // Inherent block first, then the trait impl; `new` has no receiver.
    let methods: Vec<_> = shape.methods().iter().map(MethodDecl::name).collect();
    assert_eq!(methods.first(), Some(&"set_name"));
    assert_eq!(methods.last(), Some(&"get_shadowed_interface_method"));
    assert!(!methods.contains(&"new"));

    assert_eq!(shape.method("set_pair").unwrap().params().len(), 2);
    assert_eq!(shape.method("get_children").unwrap().returns().unwrap().name(), "Vec<JavaBean>");
    assert_eq!(shape.method("set_list").unwrap().params()[0].name(), "Vec<String>");
    assert_eq!(shape.method("get_name").unwrap().visibility(), Visibility::Public);
    assert_eq!(
        shape.method("get_ignored_transient_annotation_field").unwrap().visibility(),
        Visibility::Protected,
    );
    assert!(shape.method("compute").unwrap().invoker().is_none());
    assert!(!shape.method("set_bool").unwrap().is_abstract());

    let interface = <dyn ComplexInterface as Introspect>::type_shape();
    assert_eq!(interface.kind(), ShapeKind::Interface);
    assert_eq!(interface.methods().len(), 3);
    assert!(interface.methods().iter().all(MethodDecl::is_abstract));
    assert_eq!(
        interface.method("get_shadowed_interface_method").unwrap().annotations(),
        ["XmlTransient"],
    );

    let admin = Admin::type_shape();
    assert_eq!(admin.name(), "Administrator");
    assert_eq!(admin.fields().len(), 1);
    assert_eq!(admin.super_edge().unwrap().ty().name(), "User");
}

#[test]
fn unnameable_signatures_are_untyped() {
    let shape = Widget::type_shape();
    for name in ["with_label", "set_title", "get_parsed", "get_chars", "set_bytes"] {
        let method = shape.method(name).unwrap();
        assert!(method.params().is_empty(), "`{name}` has no typed parameters");
        assert!(method.returns().is_none(), "`{name}` has no typed return");
        assert!(method.invoker().is_none());
    }
    assert!(shape.method("get_label").unwrap().returns().unwrap().is::<String>());

    let plan = SerializationPlan::of::<Widget>(&PlannerConfig::default()).unwrap();
    assert_eq!(plan.names().collect::<Vec<_>>(), ["label"]);
    assert_eq!(plan.get("label").unwrap().kind(), EntryKind::Accessor);
}

#[test]
fn associated_types_of_trait_impls() {
    let shape = Countdown::type_shape();
    let next = shape.method("next").unwrap().returns().unwrap();
    assert_eq!(next.name(), "Option<<Countdown as Iterator>::Item>");
    assert!(next.is::<Option<u8>>());

    let plan = SerializationPlan::of::<Countdown>(&PlannerConfig::default()).unwrap();
    assert_eq!(plan.len(), 2);
    let reading = plan.get("reading").unwrap();
    assert!(reading.value_type().is::<u16>());
    assert!(!reading.is_writable());

    let countdown = Countdown { remaining: 3 };
    let value = reading.read(&countdown).unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), "30");
}

#[test]
fn interface_signatures_mentioning_self() {
    let shape = <dyn Shaped as Introspect>::type_shape();
    assert_eq!(shape.methods().len(), 4);
    assert!(shape.method("get_sides").unwrap().returns().unwrap().is::<u8>());
    for name in ["get_scaled", "get_copy", "get_twin"] {
        assert!(shape.method(name).unwrap().returns().is_none(), "`{name}` is untyped");
    }
}

// -----------------------------------------------------------------------------
// Plans

#[test]
fn java_bean_plan() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();

    assert_eq!(plan.type_name(), "JavaBean");
    assert_eq!(plan.names().collect::<Vec<_>>(), JAVA_BEAN_PROPERTIES);
    assert!(plan.entries().iter().all(|e| e.kind() == EntryKind::Accessor));

    let writable: Vec<_> = plan
        .entries()
        .iter()
        .filter(|e| !e.is_writable())
        .map(|e| e.name())
        .collect();
    assert_eq!(writable, ["list_without_setter"]);

    assert_eq!(plan.get("bool").unwrap().value_type().name(), "Option<bool>");
    assert_eq!(plan.get("children").unwrap().value_type().name(), "Vec<JavaBean>");
    assert_eq!(plan.get("name").unwrap().read_owner(), "JavaBean");
}

#[test]
fn names_are_unique() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    let mut names: Vec<_> = plan.names().collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), plan.len());
}

#[test]
fn ordering_is_stable() {
    let cfg = PlannerConfig::default();
    let first = SerializationPlan::of::<JavaBean>(&cfg).unwrap();
    for _ in 0..4 {
        let again = SerializationPlan::of::<JavaBean>(&cfg).unwrap();
        assert!(first.names().eq(again.names()));
    }
}

#[test]
fn getter_and_setter_pair() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    let name = plan.get("name").unwrap();
    assert!(name.is_writable());

    let mut bean = JavaBean::default();
    name.write_from(&mut bean, &mut serde_json::Deserializer::from_str("\"Ada\""))
        .unwrap();
    assert_eq!(bean.name, "Ada");
    let value = name.read(&bean).unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), "\"Ada\"");
}

#[test]
fn interface_marker_overridden_without_marker() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    let entry = plan.get("shadowed_interface_method").unwrap();
    assert!(entry.is_writable());
    assert_eq!(entry.read_owner(), "JavaBean");

    let mut bean = JavaBean::default();
    entry
        .write_from(&mut bean, &mut serde_json::Deserializer::from_str("\"visible\""))
        .unwrap();
    assert_eq!(bean.get_shadowed_interface_method(), "visible");
}

#[test]
fn excluded_members_stay_out() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    for name in [
        "ignored_transient_annotation_field",
        "ignored_xml_transient_annotation_field",
        "ignored_transient_field",
    ] {
        assert!(plan.get(name).is_none(), "`{name}` is marked");
    }

    let token = SerializationPlan::of::<Token>(&PlannerConfig::default()).unwrap();
    assert_eq!(token.names().collect::<Vec<_>>(), ["value", "raw"]);
    assert!(token.get("value").unwrap().is_writable());
    assert!(!token.get("raw").unwrap().is_writable());
    assert_eq!(token.get("raw").unwrap().kind(), EntryKind::Field);
}

#[test]
fn two_parameter_setter_is_ignored() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    assert!(plan.get("pair").is_none());
}

#[test]
fn write_only_and_abstract_reads_are_dropped() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    assert!(plan.get("write_only").is_none());
    assert!(plan.get("java_interface").is_none());
}

#[test]
fn boolean_getter() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    let entry = plan.get("bool").unwrap();
    assert!(entry.is_writable());

    let mut bean = sample();
    entry
        .write_from(&mut bean, &mut serde_json::Deserializer::from_str("false"))
        .unwrap();
    assert_eq!(bean.is_bool(), Some(false));
}

#[test]
fn custom_marker_vocabulary() {
    let cfg = PlannerConfig::from_toml_str("ignore_markers = []").unwrap();
    let plan = SerializationPlan::of::<JavaBean>(&cfg).unwrap();

    assert!(plan.get("ignored_transient_annotation_field").is_some());
    assert!(plan.get("ignored_xml_transient_annotation_field").is_some());
    // Storage transience does not depend on the ignore vocabulary.
    assert!(plan.get("ignored_transient_field").is_none());
}

#[test]
fn ambiguous_property_types() {
    let err = SerializationPlan::of::<Gauge>(&PlannerConfig::default()).unwrap_err();
    assert_eq!(
        err,
        PlanError::AmbiguousProperty {
            type_name: "Gauge",
            property: "level".into(),
            first: "u32",
            second: "String",
        }
    );
}

// -----------------------------------------------------------------------------
// Invocation

#[test]
fn view_serializes_in_plan_order() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    assert_eq!(
        json(&plan, &sample()),
        concat!(
            r#"{"name":"bean","number":7,"bool":true,"java_enum":"Two","children":[],"#,
            r#""list":["a"],"list_without_setter":[],"java_class_with_interface":{"value":"x"},"#,
            r#""shadowed_interface_method":"shadow"}"#,
        )
    );
}

#[test]
fn writes_through_setters() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    let mut bean = JavaBean::default();

    let write = |bean: &mut JavaBean, name: &str, value: &str| {
        plan.get(name)
            .unwrap()
            .write_from(bean, &mut serde_json::Deserializer::from_str(value))
            .unwrap();
    };
    write(&mut bean, "list", r#"["x","y"]"#);
    write(&mut bean, "java_enum", r#""Two""#);
    write(&mut bean, "children", r#"[{"name":"child","number":1,"bool":null,"java_enum":"One","children":[],"list":[],"list_without_setter":[],"java_class_with_interface":{"value":""},"ignored_transient_annotation_field":"","ignored_xml_transient_annotation_field":"","ignored_transient_field":"","shadowed_interface_method":""}]"#);

    assert_eq!(bean.list, ["x", "y"]);
    assert_eq!(bean.java_enum, JavaEnum::Two);
    assert_eq!(bean.children.len(), 1);
    assert_eq!(bean.children[0].name, "child");
}

#[test]
fn inherited_members_through_extends() {
    let plan = SerializationPlan::of::<Admin>(&PlannerConfig::default()).unwrap();
    assert_eq!(plan.type_name(), "Administrator");
    assert_eq!(plan.names().collect::<Vec<_>>(), ["level", "id", "name"]);
    assert_eq!(plan.get("level").unwrap().kind(), EntryKind::Field);
    assert_eq!(plan.get("name").unwrap().read_owner(), "User");

    let mut admin = Admin {
        user: User {
            id: 7,
            name: "root".into(),
        },
        level: 3,
    };
    assert_eq!(json(&plan, &admin), r#"{"level":3,"id":7,"name":"root"}"#);

    plan.get("name")
        .unwrap()
        .write_from(&mut admin, &mut serde_json::Deserializer::from_str("\"ada\""))
        .unwrap();
    plan.get("id")
        .unwrap()
        .write_from(&mut admin, &mut serde_json::Deserializer::from_str("9"))
        .unwrap();
    assert_eq!(admin.user.get_name(), "ada");
    assert_eq!(admin.user.id, 9);
}

#[test]
fn access_errors() {
    let plan = SerializationPlan::of::<JavaBean>(&PlannerConfig::default()).unwrap();
    let mut bean = sample();

    let err = plan
        .get("list_without_setter")
        .unwrap()
        .write_from(&mut bean, &mut serde_json::Deserializer::from_str("[]"))
        .unwrap_err();
    assert!(matches!(err, AccessError::ReadOnly { property } if property == "list_without_setter"));

    let err = plan.get("name").unwrap().read(&42_u8).err().unwrap();
    assert!(matches!(err, AccessError::TargetMismatch { expected: "JavaBean" }));

    let err = plan
        .get("number")
        .unwrap()
        .write_from(&mut bean, &mut serde_json::Deserializer::from_str("\"seven\""))
        .unwrap_err();
    assert!(matches!(err, AccessError::Deserialize(_)));
    assert_eq!(bean.number, 7);

    assert!(serde_json::to_string(&plan.view(&User::default())).is_err());
}

// -----------------------------------------------------------------------------
// Cache

#[test]
fn cached_plans_are_shared() {
    let cache = PlanCache::default();
    let first = cache.get::<JavaBean>().unwrap();
    let second = cache.get::<JavaBean>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    let by_id = cache.get_by_id(TypeId::of::<JavaBean>()).unwrap();
    assert!(Arc::ptr_eq(&first, &by_id));
}

#[test]
fn one_build_under_contention() {
    let before = COUNTED_SHAPE_CALLS.load(Ordering::SeqCst);
    plan_type(TypeRef::of::<Counted>(), &PlannerConfig::default()).unwrap();
    let per_build = COUNTED_SHAPE_CALLS.load(Ordering::SeqCst) - before;
    assert!(per_build > 0);

    let cache = PlanCache::default();
    let start = Barrier::new(8);
    let before = COUNTED_SHAPE_CALLS.load(Ordering::SeqCst);
    let plans: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    start.wait();
                    cache.get::<Counted>().unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(COUNTED_SHAPE_CALLS.load(Ordering::SeqCst) - before, per_build);
    assert!(plans.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.len(), 1);
}

#[test]
fn invalidation_builds_a_new_plan() {
    let cache = PlanCache::default();
    let old = cache.get::<Admin>().unwrap();

    assert!(cache.invalidate(TypeId::of::<Admin>()));
    assert!(!cache.invalidate(TypeId::of::<Admin>()));
    assert!(cache.is_empty());

    let new = cache.get::<Admin>().unwrap();
    assert!(!Arc::ptr_eq(&old, &new));
    assert!(old.names().eq(new.names()));

    cache.get::<JavaBean>().unwrap();
    cache.invalidate_all();
    assert!(cache.is_empty());
}

#[test]
fn unreflectable_types() {
    let cache = PlanCache::default();

    let err = cache.get::<Session>().unwrap_err();
    assert_eq!(
        err,
        PlanError::UnreflectableType {
            type_name: "Handle".into()
        }
    );
    assert!(cache.is_empty());
    // Nothing was cached, so the retry fails the same way.
    assert_eq!(cache.get::<Session>().unwrap_err(), err);

    assert!(matches!(
        cache.get_by_id(TypeId::of::<u8>()),
        Err(PlanError::UnreflectableType { .. })
    ));
}

#[test]
fn lookup_by_id_after_manual_registration() {
    let cache = PlanCache::default();
    cache.registry().register::<User>();

    let plan = cache.get_by_id(TypeId::of::<User>()).unwrap();
    assert_eq!(plan.names().collect::<Vec<_>>(), ["id", "name"]);
}

#[cfg(feature = "auto_register")]
#[test]
fn derived_types_are_registered() {
    let cache = PlanCache::default();
    assert!(cache.registry().contains(TypeId::of::<Gauge>()));
    assert!(cache.registry().contains(TypeId::of::<dyn ComplexInterface>()));
}

#[test]
fn global_cache() {
    let plan = plan_of::<User>().unwrap();
    assert!(Arc::ptr_eq(&plan, &plan_of::<User>().unwrap()));
    assert!(PlanCache::init_global(PlannerConfig::default()).is_err());
}
