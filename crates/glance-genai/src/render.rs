use serde_json::Value;

/// Text form of a reply.
///
/// A bare string renders as its content, and so does an object holding exactly
/// one string member (`{"reply": "..."}`). Everything else renders as compact JSON.
pub fn render_reply(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) if map.len() == 1 => match map.values().next() {
            Some(Value::String(text)) => text.clone(),
            _ => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Everything before the first '.', or the whole text if there is none
pub fn truncate_at_period(text: &str) -> &str {
    text.split_once('.').map_or(text, |(head, _)| head)
}

/// Display string for a successful reply
pub fn display_reply(value: &Value, truncate: bool) -> String {
    let rendered = render_reply(value);
    if truncate {
        truncate_at_period(&rendered).to_string()
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_string_member_renders_as_text() {
        let reply = json!({ "reply": "Okay. Thanks" });
        assert_eq!(render_reply(&reply), "Okay. Thanks");
        assert_eq!(display_reply(&reply, true), "Okay");
    }

    #[test]
    fn rendering_without_period_is_kept_whole() {
        let reply = json!({ "reply": "No period here" });
        assert_eq!(display_reply(&reply, true), "No period here");
    }

    #[test]
    fn other_shapes_render_as_json() {
        let reply = json!({ "reply": "a", "model": "b" });
        assert_eq!(render_reply(&reply), r#"{"model":"b","reply":"a"}"#);

        let nested = json!({ "data": { "score": 0.5 } });
        assert_eq!(display_reply(&nested, true), r#"{"data":{"score":0"#);
    }

    #[test]
    fn truncation_can_be_disabled() {
        let reply = json!("v1.2 released.");
        assert_eq!(display_reply(&reply, false), "v1.2 released.");
        assert_eq!(display_reply(&reply, true), "v1");
    }

    #[test]
    fn leading_period_yields_empty_text() {
        assert_eq!(truncate_at_period(".hidden"), "");
    }
}
