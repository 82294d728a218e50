use blokify_core::{BlokifyError, extract_metadata, extract_metadata_from_str};
use blokify_storyblok::{
    ClipboardFormat, InstanceOptions, SchemaDocument, SchemaOptions, check_paste_contract,
    clipboard_text, format_schema, generate_clipboard_payload, generate_instance,
    generate_schema,
};
use serde_json::{Value as JsonValue, json};

fn button_story() -> JsonValue {
    json!({
        "title": "Components/Button",
        "argTypes": {
            "variant": {
                "control": { "type": "select", "options": ["primary", "secondary"] }
            }
        }
    })
}

// Shape of the Button demo story shipped with the addon.
fn configured_button_story() -> JsonValue {
    json!({
        "title": "Components/Button",
        "argTypes": {
            "label": { "control": "text", "description": "Button label text", "defaultValue": "Click me" },
            "variant": {
                "control": "select",
                "options": ["primary", "secondary", "outline"],
                "defaultValue": "primary"
            },
            "size": { "control": "select", "options": ["small", "medium", "large"], "defaultValue": "medium" },
            "disabled": { "control": "boolean", "defaultValue": false },
            "onClick": { "table": { "disable": true } }
        },
        "parameters": {
            "docs": { "description": { "component": "A versatile button component." } },
            "storyblok": {
                "blockName": "button",
                "displayName": "Button",
                "category": "Interactive",
                "icon": "block-icon-button",
                "fieldMappings": {
                    "label": { "type": "text", "required": true, "description": "The text displayed on the button" },
                    "disabled": { "type": "boolean", "description": "Whether the button is disabled" }
                },
                "documentation": "http://localhost:6006/?path=/docs/components-button--docs"
            }
        },
        "componentStories": [
            { "name": "Primary" }, { "name": "Secondary" }, { "name": "Disabled" }
        ]
    })
}

#[test]
fn button_schema_end_to_end() {
    let metadata = extract_metadata(&button_story()).unwrap();
    let doc = generate_schema(&metadata, &SchemaOptions::default());

    assert_eq!(doc.name, "button");
    assert_eq!(
        serde_json::to_value(&doc.schema["variant"]).unwrap(),
        json!({
            "type": "option",
            "options": [
                { "name": "Primary", "value": "primary" },
                { "name": "Secondary", "value": "secondary" }
            ]
        })
    );
    assert_eq!(
        doc.schema["_storybook_link"].default_value,
        Some(json!("http://localhost:6006/?path=/docs/button--docs"))
    );
}

#[test]
fn button_instance_end_to_end() {
    let metadata = extract_metadata(&button_story()).unwrap();
    let instance = generate_instance(&metadata, &InstanceOptions::default());
    let value = serde_json::to_value(&instance).unwrap();

    assert_eq!(value["component"], json!("Button"));
    assert_eq!(value["variant"], json!("primary"));
    assert_eq!(value["id"], json!(""));
    let uid = value["_uid"].as_str().unwrap();
    assert_eq!(uid.len(), 36);
    assert_eq!(uid.as_bytes()[14], b'4');
}

#[test]
fn configured_story_uses_author_mappings() {
    let metadata = extract_metadata(&configured_button_story()).unwrap();
    assert_eq!(metadata.variants, vec!["Primary", "Secondary", "Disabled"]);

    let doc = generate_schema(&metadata, &SchemaOptions::default());
    assert_eq!(doc.name, "button");
    assert_eq!(doc.image.as_deref(), Some("block-icon-button"));
    assert_eq!(
        doc.description.as_deref(),
        Some("A versatile button component.")
    );
    assert_eq!(
        doc.schema.keys().collect::<Vec<_>>(),
        vec!["_storybook_link", "disabled", "label", "size", "variant"]
    );

    let label = serde_json::to_value(&doc.schema["label"]).unwrap();
    assert_eq!(
        label,
        json!({
            "type": "text",
            "description": "The text displayed on the button",
            "required": true,
            "default_value": "Click me"
        })
    );

    let disabled = serde_json::to_value(&doc.schema["disabled"]).unwrap();
    assert_eq!(disabled["required"], json!(false));
    assert_eq!(disabled["default_value"], json!(false));

    assert_eq!(
        doc.schema["_storybook_link"].default_value,
        Some(json!(
            "http://localhost:6006/?path=/docs/components-button--docs"
        ))
    );

    let instance = generate_instance(&metadata, &InstanceOptions::default());
    assert_eq!(instance.component, "button");
    assert_eq!(instance.values["label"], json!("Click me"));
    assert_eq!(instance.values["size"], json!("medium"));
    assert_eq!(instance.values["disabled"], json!(false));
    assert!(!instance.values.contains_key("onClick"));
}

#[test]
fn absent_context_aborts_the_pipeline() {
    let err = extract_metadata(&JsonValue::Null).unwrap_err();
    assert!(matches!(err, BlokifyError::InvalidInput(_)));
}

#[test]
fn extracted_props_never_include_hidden_args() {
    let keys = ["__hidden", "_private", "shown", "__", "alsoShown", "disabledArg"];
    let mut arg_types = serde_json::Map::new();
    for (i, key) in keys.iter().enumerate() {
        let disabled = i % 2 == 0 || *key == "disabledArg";
        arg_types.insert(
            key.to_string(),
            json!({ "control": "text", "table": { "disable": disabled } }),
        );
    }
    let metadata = extract_metadata(&json!({ "argTypes": arg_types })).unwrap();

    for (key, prop) in &metadata.props {
        assert!(!key.starts_with("__"));
        assert_eq!(&prop.name, key);
    }
    assert_eq!(
        metadata.props.keys().collect::<Vec<_>>(),
        vec!["_private"]
    );
}

#[test]
fn summary_defaults_differ_between_schema_and_instance() {
    let metadata = extract_metadata(&json!({
        "title": "Forms/Toggle",
        "argTypes": {
            "checked": { "control": "boolean", "table": { "defaultValue": { "summary": "false" } } },
            "label": { "control": "text", "table": { "defaultValue": { "summary": "not-json" } } }
        }
    }))
    .unwrap();

    let doc = generate_schema(&metadata, &SchemaOptions::default());
    assert_eq!(doc.schema["checked"].default_value, Some(json!("false")));

    let instance = generate_instance(&metadata, &InstanceOptions::default());
    assert_eq!(instance.values["checked"], json!(false));
    assert_eq!(instance.values["label"], json!("not-json"));
}

#[test]
fn schema_text_round_trips() {
    let metadata = extract_metadata(&configured_button_story()).unwrap();
    let doc = generate_schema(&metadata, &SchemaOptions::default());
    for indent in [0, 2, 4] {
        let text = format_schema(&doc, indent).unwrap();
        let parsed = SchemaDocument::from_json(&text).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(format_schema(&parsed, indent).unwrap(), text);
    }
}

#[test]
fn clipboard_text_is_accepted_by_the_bookmarklet() {
    let metadata =
        extract_metadata_from_str(&serde_json::to_string(&configured_button_story()).unwrap())
            .unwrap();
    let text = clipboard_text(
        &metadata,
        ClipboardFormat::Array,
        &InstanceOptions::default(),
        2,
    )
    .unwrap();
    assert_eq!(check_paste_contract(&text).unwrap(), 1);

    let payload = generate_clipboard_payload(&metadata, &InstanceOptions::default());
    let text = serde_json::to_string(&payload).unwrap();
    assert_eq!(check_paste_contract(&text).unwrap(), 1);
}

#[test]
fn odd_field_mappings_keep_the_configured_block_name() {
    for mappings in [
        json!({ "label": null }),
        json!({ "size": { "type": "option", "options": ["s", "m"] } }),
    ] {
        let metadata = extract_metadata(&json!({
            "title": "Components/Button",
            "argTypes": {
                "label": { "control": "text" },
                "size": { "control": "select", "options": ["small", "large"] }
            },
            "parameters": {
                "storyblok": { "blockName": "cta-button", "fieldMappings": mappings }
            }
        }))
        .unwrap();

        let doc = generate_schema(&metadata, &SchemaOptions::default());
        assert_eq!(doc.name, "cta-button");
        let instance = generate_instance(&metadata, &InstanceOptions::default());
        assert_eq!(instance.component, "cta-button");
    }

    let metadata = extract_metadata(&json!({
        "title": "Components/Button",
        "argTypes": { "size": { "control": "select", "options": ["small", "large"] } },
        "parameters": {
            "storyblok": {
                "blockName": "cta-button",
                "fieldMappings": { "size": { "type": "option", "options": ["s", "m"] } }
            }
        }
    }))
    .unwrap();
    let doc = generate_schema(&metadata, &SchemaOptions::default());
    assert_eq!(
        serde_json::to_value(&doc.schema["size"]).unwrap(),
        json!({ "type": "option", "required": false, "options": ["s", "m"] })
    );
}

#[test]
fn instance_defaults_keep_raw_story_values() {
    let metadata = extract_metadata(&json!({
        "title": "Layout/Grid",
        "argTypes": {
            "v": {
                "control": "select",
                "options": ["a", "b"],
                "table": { "defaultValue": { "summary": null } }
            },
            "n": { "control": { "type": "select", "options": [1, 2] } }
        }
    }))
    .unwrap();

    let instance = generate_instance(&metadata, &InstanceOptions::default());
    assert_eq!(instance.values["v"], JsonValue::Null);
    assert_eq!(instance.values["n"], json!(1));

    let doc = generate_schema(&metadata, &SchemaOptions::default());
    assert_eq!(doc.schema["v"].default_value, None);
    assert_eq!(
        serde_json::to_value(&doc.schema["n"].options).unwrap(),
        json!([{ "name": "1", "value": 1 }, { "name": "2", "value": 2 }])
    );
}
