//! JSON output.

use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{}", output);
    Ok(())
}

/// Standard acknowledgement object for write commands.
pub fn status_json(fields: serde_json::Value) -> serde_json::Value {
    let mut object = serde_json::json!({ "status": "ok" });
    if let (Some(target), serde_json::Value::Object(extra)) = (object.as_object_mut(), fields) {
        target.extend(extra);
    }
    object
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_merges_fields() {
        let value = status_json(serde_json::json!({ "id": 4, "name": "Widget" }));
        assert_eq!(value["status"], "ok");
        assert_eq!(value["id"], 4);
        assert_eq!(value["name"], "Widget");
    }
}
