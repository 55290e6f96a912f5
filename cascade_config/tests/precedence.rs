//! Source precedence and field assignment across a whole record.
//!
//! Every test resolves against an environment snapshot so nothing depends on
//! the host's process environment.

use anyhow::{Result, anyhow, ensure};
use cascade_config::{
    CascadeConfig, CascadeError, Environment, Loader, RemoteParams, SecretStore, Sources,
};
use rstest::rstest;
use serde::Deserialize;
use test_helpers::secrets::SecretDir;

#[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
struct Database {
    #[cascade_config(env = "DB_HOST", default = "db.local")]
    host: String,
    #[cascade_config(required)]
    port: u16,
    retries: u32,
    #[cascade_config(secret = "db_password")]
    password: String,
    verbose: bool,
}

fn env(vars: &[(&str, &str)]) -> Environment {
    vars.iter().copied().collect()
}

fn load(sources: Sources<'_>) -> Result<Database> {
    let mut db = Database::default();
    Loader::new(sources)
        .load(&mut db)
        .map_err(|err| anyhow!(err))?;
    Ok(db)
}

#[rstest]
fn env_override_key_is_used_verbatim() -> Result<()> {
    let db = load(Sources::new().with_env(env(&[("DB_HOST", "localhost"), ("PORT", "5432")])))?;
    ensure!(db.host == "localhost", "host = {}", db.host);
    ensure!(db.port == 5432, "port = {}", db.port);
    Ok(())
}

#[rstest]
fn remote_parameters_populate_fields() -> Result<()> {
    let remote: RemoteParams = [("RETRIES", "3"), ("PORT", "6543")].into_iter().collect();
    let db = load(Sources::new().with_remote(&remote))?;
    ensure!(db.retries == 3, "retries = {}", db.retries);
    ensure!(db.port == 6543, "port = {}", db.port);
    ensure!(db.host == "db.local", "default host lost: {}", db.host);
    Ok(())
}

#[rstest]
fn missing_required_field_names_it() {
    let outcome = load(Sources::new().with_env(env(&[("DB_HOST", "localhost")])));
    let Err(err) = outcome else {
        panic!("expected a missing port");
    };
    match err.downcast_ref::<CascadeError>() {
        Some(CascadeError::RequiredFieldMissing { field, key }) => {
            assert_eq!(field, "port");
            assert_eq!(key, "PORT");
        }
        other => panic!("expected RequiredFieldMissing, got {other:?}"),
    }
}

#[rstest]
#[case::default_only(&[], &[], None, "db.local")]
#[case::remote_beats_default(&[("HOST", "remote")], &[], None, "remote")]
#[case::env_beats_remote(&[("HOST", "remote")], &[("DB_HOST", "env")], None, "env")]
#[case::secret_beats_env(&[("HOST", "remote")], &[("DB_HOST", "env")], Some("secret"), "secret")]
#[case::empty_env_is_unset(&[("HOST", "remote")], &[("DB_HOST", "")], None, "remote")]
#[case::derived_env_key_ignored(&[], &[("HOST", "env")], None, "db.local")]
fn layers_apply_in_order(
    #[case] remote: &[(&str, &str)],
    #[case] vars: &[(&str, &str)],
    #[case] secret: Option<&str>,
    #[case] expected: &str,
) -> Result<()> {
    let params: RemoteParams = remote
        .iter()
        .copied()
        .chain([("PORT", "1")])
        .collect();
    let secrets = SecretDir::new()?;
    if let Some(value) = secret {
        secrets.write("host", value)?;
    }
    let store = SecretStore::open(secrets.path()).map_err(|err| anyhow!(err))?;
    let db = load(
        Sources::new()
            .with_remote(&params)
            .with_env(env(vars))
            .with_secrets(store),
    )?;
    ensure!(db.host == expected, "expected {expected}, got {}", db.host);
    Ok(())
}

#[rstest]
fn secrets_are_trimmed_and_use_overrides() -> Result<()> {
    let secrets = SecretDir::with_files(&[("db_password", "  s3cret\n"), ("port", "7000\n")])?;
    let store = SecretStore::open(secrets.path()).map_err(|err| anyhow!(err))?;
    let db = load(Sources::new().with_secrets(store))?;
    ensure!(db.password == "s3cret", "password = {:?}", db.password);
    ensure!(db.port == 7000, "port = {}", db.port);
    Ok(())
}

#[rstest]
fn preset_fields_are_never_overwritten() -> Result<()> {
    let mut db = Database {
        host: "preset.example".into(),
        port: 1,
        verbose: true,
        ..Database::default()
    };
    let vars = env(&[("DB_HOST", "env"), ("PORT", "2"), ("VERBOSE", "false"), ("RETRIES", "5")]);
    Loader::new(Sources::new().with_env(vars))
        .load(&mut db)
        .map_err(|err| anyhow!(err))?;
    ensure!(db.host == "preset.example", "host overwritten: {}", db.host);
    ensure!(db.port == 1, "port overwritten: {}", db.port);
    ensure!(db.verbose, "verbose overwritten");
    ensure!(db.retries == 5, "blank retries not filled: {}", db.retries);
    Ok(())
}

#[rstest]
#[case("0", false)]
#[case("f", false)]
#[case("F", false)]
#[case("false", false)]
#[case("FALSE", false)]
#[case("1", true)]
#[case("yes", true)]
fn boolean_tokens(#[case] raw: &str, #[case] expected: bool) -> Result<()> {
    let db = load(Sources::new().with_env(env(&[("PORT", "1"), ("VERBOSE", raw)])))?;
    ensure!(db.verbose == expected, "{raw:?} gave {}", db.verbose);
    Ok(())
}

#[rstest]
fn disabled_defaults_leave_fields_blank() -> Result<()> {
    let db = load(
        Sources::new()
            .defaults(false)
            .with_env(env(&[("PORT", "1")])),
    )?;
    ensure!(db.host.is_empty(), "default applied: {}", db.host);
    Ok(())
}

#[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
struct Annotated {
    #[cascade_config(note = "primary host", env = "PGHOST")]
    host: String,
    #[cascade_config(since = 2, remote = "PG_PORT", default = 5432)]
    port: u16,
}

#[rstest]
fn overrides_after_unrecognised_keys_apply() -> Result<()> {
    let remote: RemoteParams = [("PG_PORT", "6432"), ("PORT", "1")].into_iter().collect();
    let mut annotated = Annotated::default();
    Loader::new(
        Sources::new()
            .with_remote(&remote)
            .with_env(env(&[("PGHOST", "pg.internal"), ("HOST", "derived")])),
    )
    .load(&mut annotated)
    .map_err(|err| anyhow!(err))?;
    ensure!(annotated.host == "pg.internal", "host = {}", annotated.host);
    ensure!(annotated.port == 6432, "port = {}", annotated.port);
    Ok(())
}
