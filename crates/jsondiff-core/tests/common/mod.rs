use jsondiff_core::{compare, Field, Object, Summary, Value};

/// Compare two `serde_json` documents, panicking on error
#[allow(dead_code)]
pub fn diff(left: serde_json::Value, right: serde_json::Value) -> Summary {
    compare(&Value::from(left), &Value::from(right)).unwrap()
}

/// `obj` where `obj.self = obj`
#[allow(dead_code)]
pub fn self_referential_object() -> Value {
    let obj = Object::new();
    obj.insert("self", Value::Object(obj.clone()));
    Value::Object(obj)
}

/// `{"child": {"back": <root>}}`, a cycle of length two
#[allow(dead_code)]
pub fn transitive_cycle() -> Value {
    let root = Object::new();
    let child = Object::new();
    child.insert("back", Value::Object(root.clone()));
    root.insert("child", Value::Object(child));
    Value::Object(root)
}

/// Every Field in the tree, depth-first in Field order
#[allow(dead_code)]
pub fn all_fields(summary: &Summary) -> Vec<&Field> {
    let mut fields = Vec::new();
    collect(summary, &mut fields);
    fields
}

#[allow(dead_code)]
fn collect<'a>(summary: &'a Summary, out: &mut Vec<&'a Field>) {
    for field in &summary.fields {
        out.push(field);
        if let Some(children) = &field.children {
            collect(children, out);
        }
    }
}
