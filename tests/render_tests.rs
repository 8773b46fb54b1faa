use predicates::prelude::*;

mod common;
use common::{
    EMPTY_CONTEXT, FULL_INSTANCE, LINKED_CONTEXT, SPEC_WITH_DEFAULT, SPEC_WITHOUT_PROPERTIES,
    TestJob,
};

/// A property from the context is rendered
#[test]
fn test_property_value() {
    let job = TestJob::new()
        .context("properties:\n  foo: bar\n")
        .spec(SPEC_WITH_DEFAULT)
        .template(r#"{{ p(name="foo") }}"#);

    assert_eq!(job.render("config/out"), "bar");
}

/// The job spec default applies when the context has no value
#[test]
fn test_spec_default() {
    let job = TestJob::new()
        .context(EMPTY_CONTEXT)
        .spec(SPEC_WITH_DEFAULT)
        .template(r#"{{ p(name="foo") }}"#);

    assert_eq!(job.render("config/out"), "baz");
}

/// The self instance exposes every instance document field
#[test]
fn test_instance_info() {
    let job = TestJob::new().instance(FULL_INSTANCE).template(
        "{{ spec.address }} {{ spec.az }} {{ spec.bootstrap }} {{ spec.deployment }} \
         {{ spec.id }} {{ spec.index }} {{ spec.ip }} {{ spec.name }}",
    );

    assert_eq!(
        job.render("config/out"),
        "foo.deadbeef.com myaz false mydeployment 005443 123 256.256.256.256 foo"
    );
}

#[test]
fn test_self_default_network() {
    let job = TestJob::new()
        .instance(FULL_INSTANCE)
        .template("{{ spec.networks.default.ip }}/{{ spec.networks.default.dns_record_name }}");

    assert_eq!(job.render("config/out"), "256.256.256.256/foo.deadbeef.com");
}

/// Consumed link instances are exposed through link()
#[test]
fn test_links() {
    let job = TestJob::new().context(LINKED_CONTEXT).template(
        r#"{% set l = link(name="myprovider") %}{{ l.instances.0.index }} {{ l.instances.0.address }} {{ l.instances.0.az }} {{ l.instances.0.id }}"#,
    );

    assert_eq!(job.render("config/out"), "11 link.domain.foo linkaz 11nk1d");
}

#[test]
fn test_link_properties() {
    let job = TestJob::new()
        .context(LINKED_CONTEXT)
        .template(r#"{{ link_p(link="myprovider", name="exported") }}"#);

    assert_eq!(job.render("config/out"), "toaster");
}

/// A consumed link without instances is not a link at all
#[test]
fn test_unsatisfied_link_is_dropped() {
    let job = TestJob::new().context(LINKED_CONTEXT).template(
        r#"{{ has_link(name="myprovider") }} {{ has_link(name="unsatisfied") }} {{ consumes | length }}"#,
    );

    assert_eq!(job.render("config/out"), "true false 1");
}

/// A job spec without a properties key still renders
#[test]
fn test_no_properties() {
    let job = TestJob::new()
        .spec(SPEC_WITHOUT_PROPERTIES)
        .template("{{ job_spec.properties | length }} properties declared");

    assert_eq!(job.render("config/out"), "0 properties declared");
}

/// Nested property values keep their document order
#[test]
fn test_json_evaluation() {
    let job = TestJob::new()
        .context("properties:\n  foo:\n    Foo: bar\n    Bar: baz\n")
        .template(r#"{% set foo = p(name="foo") %}{{ foo | json_encode() }}"#);

    assert_eq!(job.render("config/out"), r#"{"Foo":"bar","Bar":"baz"}"#);
}

#[test]
fn test_bad_template() {
    let job = TestJob::new().template("{{ thisdoesntexist }}");

    job.command("config/out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("thisdoesntexist"));
    assert!(!job.output_path("config").exists());
}

#[test]
fn test_engine_message_passed_through() {
    let job = TestJob::new().template("{{ spec.name | nosuchfilter }}");

    job.command("config/out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Filter 'nosuchfilter' not found"))
        .stderr(predicate::str::contains("syntax").not());
}

#[test]
fn test_missing_property_suggests_close_match() {
    let job = TestJob::new()
        .context("properties:\n  redis:\n    port: 6379\n")
        .template(r#"{{ p(name="redis.prot") }}"#);

    job.command("config/out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't find property 'redis.prot'"))
        .stderr(predicate::str::contains("redis.port"));
}

/// Scenario A: no consumes path in the context
#[test]
fn test_context_without_consumes() {
    let job = TestJob::new()
        .context("properties:\n  name: cache\n")
        .template(r#"{{ p(name="name") }} {{ consumes | length }} {{ spec.name }}"#);

    assert_eq!(job.render("config/out"), "cache 0 foo");
}

/// Scenario B: one link with two instances, order preserved
#[test]
fn test_db_link_with_two_instances() {
    let job = TestJob::new()
        .context(
            r#"properties:
  bosh_containerization:
    consumes:
      db:
        instances:
          - {address: db-0.internal, index: 0}
          - {address: db-1.internal, index: 1}
"#,
        )
        .template(
            "{% for l in consumes %}{{ l.name }}={{ l.instances | length }}:{% for i in l.instances %}{{ i.address }};{% endfor %}{% endfor %}",
        );

    assert_eq!(job.render("config/out"), "db=2:db-0.internal;db-1.internal;");
}

/// Scenario C: files in a bin directory become executable
#[cfg(unix)]
#[test]
fn test_bin_destination_mode() {
    let job = TestJob::new().template("#!/bin/sh\necho hi\n").template_mode(0o644);

    job.command("jobs/myjob/bin/run").assert().success();

    assert_eq!(common::mode(&job.output_path("jobs/myjob/bin/run")), 0o755);
}

#[cfg(unix)]
#[test]
fn test_template_mode_copied() {
    let job = TestJob::new().template("secret\n").template_mode(0o600);

    job.command("jobs/myjob/config/creds").assert().success();

    assert_eq!(common::mode(&job.output_path("jobs/myjob/config/creds")), 0o600);
}

/// Scenario D: a missing template fails before anything is created
#[test]
fn test_missing_template() {
    let job = TestJob::new();
    let template = job.path().join("templates/missing.tera");

    job.command_with(&template, "out/dir/file")
        .assert()
        .failure()
        .stderr(predicate::str::contains("template"))
        .stderr(predicate::str::contains("missing.tera"));

    assert!(!job.output_path("out").exists());
}

/// Scenario E: several missing directory levels are created
#[test]
fn test_missing_output_directories() {
    let job = TestJob::new().template("content\n");

    assert_eq!(job.render("a/b/c/d/config.yml"), "content\n");
}

#[test]
fn test_missing_context_document() {
    let job = TestJob::new();
    std::fs::remove_file(job.path().join("context.yml")).unwrap();

    job.command("out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read context file"));
}

#[test]
fn test_malformed_spec() {
    let job = TestJob::new().spec("properties: {foo: [}\n");

    job.command("out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse job spec file"));
}

#[test]
fn test_help_lists_positional_arguments() {
    let mut cmd = assert_cmd::Command::cargo_bin("bosh-render").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONTEXT"))
        .stdout(predicate::str::contains("OUTPUT"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_missing_arguments() {
    let mut cmd = assert_cmd::Command::cargo_bin("bosh-render").unwrap();
    cmd.arg("only-one.yml").assert().failure();
}

#[test]
fn test_paths_logged_at_info() {
    let job = TestJob::new().template("x");

    job.command("out")
        .assert()
        .success()
        .stderr(predicate::str::contains("Template file:"))
        .stderr(predicate::str::contains("Output file:"));
}

#[test]
fn test_quiet_suppresses_info_logs() {
    let job = TestJob::new().template("x");

    job.command("out")
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("Template file:").not());
}
