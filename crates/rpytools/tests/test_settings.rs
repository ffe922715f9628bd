use rpytools::{
    FunctionDesc, RenderSettings, RewriteRule, Value, configure_settings, render_default,
    render_signature, settings,
};

// The only test in this binary that touches the process-global settings.
#[test]
fn global_settings_drive_public_helpers() {
    assert_eq!(settings(), RenderSettings::default());

    let custom = RenderSettings::from_json_str(
        r#"{
            "rules": [{"prefix": "keras."}, {"prefix": "np.", "to": "::"}],
            "keyword_only": true
        }"#,
    )
    .unwrap();
    assert_eq!(custom.rules[0], RewriteRule::namespace("keras."));
    configure_settings(custom);

    assert_eq!(render_default(&Value::object("keras.layers.Dense")), "keras$layers$Dense");
    assert_eq!(render_default(&Value::object("np.float64")), "np::float64");
    assert_eq!(render_default(&Value::object("tf.float32")), "tf.float32");

    let f = FunctionDesc::new("sum")
        .arg("x")
        .kwonly("axis", Some(Value::Null));
    assert_eq!(render_signature(&f).as_deref(), Some("(x, axis = NULL)"));

    configure_settings(RenderSettings::default());
    assert_eq!(render_signature(&f).as_deref(), Some("(x)"));
}
