//! Provider Workflow Integration Tests
//!
//! Converges resources against a real puppet.conf on disk:
//! - Create, update, remove and idempotent re-runs
//! - Formatting and comment preservation
//! - Purge of undeclared settings
//! - Line endings and settings that cannot be written back
//! - Editor errors passed through unchanged

mod common;

use common::{SAMPLE_CONF, TestFixture, setting};
use puppet_setting::{Catalog, Change, Ensure, Error, IniSettingProvider, IniFileEditor};

// =============================================================================
// Single Resources
// =============================================================================

#[test]
fn test_declared_server_is_written() {
    let fixture = TestFixture::new();
    let resource = setting("main/server", "puppet.example.com");

    let change = fixture.provider.apply(&resource).unwrap();

    assert_eq!(
        change,
        Change::Created {
            value: "puppet.example.com".into()
        }
    );
    assert_eq!(
        fixture.read_conf().as_deref(),
        Some("[main]\nserver = puppet.example.com\n")
    );
}

#[test]
fn test_second_run_is_unchanged() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);
    let resource = setting("agent/runinterval", "  1800  ");

    assert_eq!(fixture.provider.apply(&resource).unwrap(), Change::Unchanged);
    assert_eq!(fixture.read_conf().as_deref(), Some(SAMPLE_CONF));
}

#[test]
fn test_update_keeps_comments_and_order() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);

    let change = fixture
        .provider
        .apply(&setting("main/environment", "staging"))
        .unwrap();

    assert_eq!(
        change,
        Change::Updated {
            from: "production".into(),
            to: "staging".into()
        }
    );
    assert_eq!(
        fixture.read_conf().unwrap(),
        SAMPLE_CONF.replace("environment = production", "environment = staging")
    );
}

#[test]
fn test_new_setting_lands_in_its_section() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);

    fixture
        .provider
        .apply(&setting("main/certname", "node01.example.com"))
        .unwrap();
    fixture
        .provider
        .apply(&setting("user/color", "false"))
        .unwrap();

    let conf = fixture.read_conf().unwrap();
    assert!(conf.contains(
        "environment = production\ncertname = node01.example.com\n\n[agent]"
    ));
    assert!(conf.ends_with("runinterval = 1800\n\n[user]\ncolor = false\n"));
}

#[test]
fn test_absent_removes_regardless_of_value() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);
    let resource = setting("main/server", "not-the-current-value").with_ensure(Ensure::Absent);

    assert_eq!(fixture.provider.apply(&resource).unwrap(), Change::Removed);
    assert!(!fixture.provider.exists(&resource).unwrap());
    assert!(!fixture.read_conf().unwrap().contains("server ="));

    assert_eq!(fixture.provider.apply(&resource).unwrap(), Change::Unchanged);
}

#[test]
fn test_removing_last_setting_removes_section() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);
    let resource = setting("agent/runinterval", "1800").with_ensure(Ensure::Absent);

    fixture.provider.apply(&resource).unwrap();

    let conf = fixture.read_conf().unwrap();
    assert!(!conf.contains("[agent]"));
    assert!(conf.ends_with("environment = production\n"));
}

#[test]
fn test_absent_on_missing_file_creates_nothing() {
    let fixture = TestFixture::new();
    let resource = setting("main/server", "x").with_ensure(Ensure::Absent);

    assert_eq!(fixture.provider.apply(&resource).unwrap(), Change::Unchanged);
    assert!(fixture.read_conf().is_none());
}

#[test]
fn test_setting_with_slash_in_name() {
    let fixture = TestFixture::new();

    fixture
        .provider
        .apply(&setting("main/foo/bar", "baz"))
        .unwrap();

    assert_eq!(
        fixture.read_conf().as_deref(),
        Some("[main]\nfoo/bar = baz\n")
    );
}

// =============================================================================
// Catalogs and Purge
// =============================================================================

#[test]
fn test_catalog_apply_with_purge() {
    let fixture = TestFixture::with_conf(
        "[main]\nserver = old\nlogdir = /var/log/puppet\n\n[agent]\nnoop = true\n\n[production]\nmodulepath = /srv\n",
    );
    let catalog = Catalog::from_json(
        r#"[
            {"name": "main/server", "value": "puppet.example.com"},
            {"name": "user/color", "value": "false"}
        ]"#,
    )
    .unwrap();

    let report = catalog.apply(&fixture.provider, true).unwrap();

    assert_eq!(report.changed(), 4);
    assert_eq!(report.get("main/logdir"), Some(&Change::Removed));
    assert_eq!(report.get("agent/noop"), Some(&Change::Removed));
    assert_eq!(
        fixture.read_conf().as_deref(),
        Some(
            "[main]\nserver = puppet.example.com\n\n[production]\nmodulepath = /srv\n\n[user]\ncolor = false\n"
        )
    );

    let second = catalog.apply(&fixture.provider, true).unwrap();
    assert_eq!(second.changed(), 0);
}

#[test]
fn test_purge_removes_duplicate_keys() {
    let fixture = TestFixture::with_conf("[agent]\nnoop = true\nnoop = false\n");

    let report = Catalog::new().apply(&fixture.provider, true).unwrap();

    assert_eq!(report.changed(), 1);
    assert_eq!(report.get("agent/noop"), Some(&Change::Removed));
    assert_eq!(fixture.read_conf().as_deref(), Some(""));
    assert!(fixture.provider.instances().unwrap().is_empty());

    let second = Catalog::new().apply(&fixture.provider, true).unwrap();
    assert_eq!(second.changed(), 0);
}

#[test]
fn test_instances_reflect_file() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);

    let instances = fixture.provider.instances().unwrap();
    let names: Vec<&str> = instances.iter().map(|r| r.name().as_str()).collect();

    assert_eq!(
        names,
        vec!["main/server", "main/environment", "agent/runinterval"]
    );
    assert!(instances.iter().all(|r| r.is_present()));
    assert_eq!(instances[0].value(), Some("puppet.example.com"));
}

// =============================================================================
// Line Endings and Unwritable Settings
// =============================================================================

#[test]
fn test_crlf_conf_keeps_its_line_endings() {
    let fixture = TestFixture::with_conf("[main]\r\nserver = a\r\n");

    fixture.provider.apply(&setting("main/server", "b")).unwrap();
    fixture.provider.apply(&setting("main/certname", "x")).unwrap();

    assert_eq!(
        fixture.read_conf().as_deref(),
        Some("[main]\r\nserver = b\r\ncertname = x\r\n")
    );
    assert_eq!(
        fixture.provider.apply(&setting("main/server", "b")).unwrap(),
        Change::Unchanged
    );
}

#[test]
fn test_key_that_cannot_read_back_is_refused() {
    for name in ["main/a=b", "main/#x", "main/;x", "main/[x"] {
        let fixture = TestFixture::new();
        let resource = setting(name, "x");

        for _ in 0..3 {
            let err = fixture.provider.apply(&resource).unwrap_err();
            assert!(matches!(err, Error::UnwritableSetting { .. }), "{name}");
            assert!(fixture.read_conf().is_none(), "{name}");
        }

        let fixture = TestFixture::with_conf(SAMPLE_CONF);
        for _ in 0..3 {
            assert!(fixture.provider.apply(&resource).is_err(), "{name}");
            assert_eq!(fixture.read_conf().as_deref(), Some(SAMPLE_CONF), "{name}");
        }
    }
}

#[test]
fn test_value_with_line_break_cannot_inject_sections() {
    let fixture = TestFixture::with_conf(SAMPLE_CONF);
    let resource = setting("main/server", "x\n[master]\nautosign = true");

    let err = fixture.provider.apply(&resource).unwrap_err();

    assert!(matches!(err, Error::UnwritableSetting { .. }));
    assert_eq!(fixture.read_conf().as_deref(), Some(SAMPLE_CONF));
    assert!(
        fixture
            .provider
            .instances()
            .unwrap()
            .iter()
            .all(|r| r.name().as_str() != "master/autosign")
    );
}

#[test]
fn test_declared_value_with_line_break_is_rejected() {
    let err = Catalog::from_json(
        r#"[{"name": "main/server", "value": "x\n[master]\nautosign = true"}]"#,
    )
    .unwrap_err();
    assert!(err.is_validation_error());
}

// =============================================================================
// Editor Errors
// =============================================================================

#[test]
fn test_unreadable_target_passes_error_through() {
    let fixture = TestFixture::new();
    // A directory where the file should be
    std::fs::create_dir_all(fixture.conf_path()).unwrap();

    let err = fixture
        .provider
        .apply(&setting("main/server", "x"))
        .unwrap_err();

    assert!(err.is_io_error());
    assert!(matches!(err, Error::FileRead { ref path, .. } if *path == fixture.conf_path()));
}

#[test]
fn test_catalog_stops_on_editor_error() {
    let fixture = TestFixture::new();
    let blocker = fixture.temp_dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let provider =
        IniSettingProvider::with_target(IniFileEditor::new(), blocker.join("puppet.conf"));

    let catalog = Catalog::from_json(r#"[{"name": "main/server", "value": "x"}]"#).unwrap();
    let err = catalog.apply(&provider, false).unwrap_err();

    assert!(err.is_io_error());
}
