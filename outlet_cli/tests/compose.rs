mod common;

use outlet_core::AnyEmptyResult;
use predicates::prelude::*;
use rstest::rstest;
use similar_asserts::assert_eq;

const TEMPLATE: &str = "# <!-- outlet: title -->\nHello <!-- outlet: name -->.";

#[test]
fn compose_inline_and_file_slots() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;
	std::fs::write(tmp.path().join("world.md"), "World")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("title=Demo")
		.arg("-s")
		.arg("name=@world.md")
		.assert()
		.success()
		.stdout("# Demo\nHello World.")
		.stderr(predicate::str::is_empty());

	Ok(())
}

#[test]
fn missing_file_warns_and_keeps_marker() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("name=@missing.md")
		.assert()
		.success()
		.stdout(TEMPLATE)
		.stderr(predicate::str::contains("warning:"))
		.stderr(predicate::str::contains("slot `name`"))
		.stderr(predicate::str::contains("missing.md"))
		.stderr(predicate::str::contains("1 outlet left untouched"));

	Ok(())
}

#[test]
fn missing_file_does_not_affect_other_slots() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("title=Demo")
		.arg("-s")
		.arg("name=@missing.md")
		.assert()
		.success()
		.stdout("# Demo\nHello <!-- outlet: name -->.");

	Ok(())
}

#[test]
fn quiet_suppresses_slot_warnings() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("--quiet")
		.arg("-s")
		.arg("name=@missing.md")
		.assert()
		.success()
		.stderr(predicate::str::is_empty());

	Ok(())
}

#[test]
fn nested_reference_resolves_against_working_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("content/nested"))?;
	std::fs::create_dir_all(tmp.path().join("templates/deeper"))?;
	std::fs::write(tmp.path().join("content/nested/deep.md"), "from deep")?;
	std::fs::write(
		tmp.path().join("templates/deeper/page.t.md"),
		"<!-- outlet: body -->",
	)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("templates/deeper/page.t.md")
		.arg("-s")
		.arg("body=@content/nested/deep.md")
		.assert()
		.success()
		.stdout("from deep");

	Ok(())
}

#[test]
fn current_dir_prefixed_reference() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), "<!-- outlet: body -->")?;
	std::fs::write(tmp.path().join("body.md"), "body text")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("body=@./body.md")
		.assert()
		.success()
		.stdout("body text");

	Ok(())
}

#[test]
fn cwd_flag_changes_reference_root() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let content = tmp.path().join("content");
	std::fs::create_dir_all(&content)?;
	std::fs::write(content.join("body.md"), "elsewhere")?;
	let template = tmp.path().join("page.t.md");
	std::fs::write(&template, "<!-- outlet: body -->")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg(&template)
		.arg("--cwd")
		.arg(&content)
		.arg("-s")
		.arg("body=@body.md")
		.assert()
		.success()
		.stdout("elsewhere");

	Ok(())
}

#[test]
fn file_content_is_not_rescanned() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), "<!-- outlet: a -->")?;
	std::fs::write(tmp.path().join("a.md"), "see <!-- outlet: b -->")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("a=@a.md")
		.arg("-s")
		.arg("b=nope")
		.assert()
		.success()
		.stdout("see <!-- outlet: b -->");

	Ok(())
}

#[test]
fn last_assignment_wins() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), "<!-- outlet: x -->")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("x=first")
		.arg("-s")
		.arg("x=second")
		.assert()
		.success()
		.stdout("second");

	Ok(())
}

#[rstest]
#[case::plain(&["page.t.md", "-s", "title=Demo", "-s", "name=@world.md"])]
#[case::keyword(&["compose", "page.t.md", "-s", "title=Demo", "-s", "name=@world.md"])]
#[case::long_flags(&["page.t.md", "--slot", "title=Demo", "--slot", "name=@world.md"])]
#[case::alias(&["compose", "page.t.md", "--set", "title=Demo", "--set", "name=@world.md"])]
#[case::flags_first(&["-s", "name=@world.md", "-s", "title=Demo", "page.t.md"])]
fn equivalent_invocations_produce_identical_output(#[case] args: &[&str]) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;
	std::fs::write(tmp.path().join("world.md"), "World")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.args(args)
		.assert()
		.success()
		.stdout("# Demo\nHello World.");

	Ok(())
}

#[test]
fn output_flag_writes_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;
	let output = tmp.path().join("readme.md");

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("title=Demo")
		.arg("-o")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicate::str::is_empty());

	let content = std::fs::read_to_string(&output)?;
	assert_eq!(content, "# Demo\nHello <!-- outlet: name -->.");

	Ok(())
}

#[test]
fn template_from_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("-")
		.arg("-s")
		.arg("title=Piped")
		.write_stdin("# <!-- outlet: title -->\n")
		.assert()
		.success()
		.stdout("# Piped\n");

	Ok(())
}

#[test]
fn template_without_markers_is_unchanged() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let text = "plain <!-- comment --> text\n";
	std::fs::write(tmp.path().join("page.t.md"), text)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("unused=value")
		.assert()
		.success()
		.stdout(text);

	Ok(())
}

#[test]
fn unreadable_template_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("missing.t.md")
		.assert()
		.failure()
		.code(2)
		.stderr(predicate::str::contains("failed to read template"));

	Ok(())
}

#[test]
fn unwritable_output_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-o")
		.arg(tmp.path().join("no/such/dir/out.md"))
		.assert()
		.failure()
		.code(2)
		.stderr(predicate::str::contains("failed to write output"));

	Ok(())
}

#[test]
fn malformed_assignment_is_rejected() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("-s")
		.arg("title")
		.assert()
		.failure()
		.stderr(predicate::str::contains("NAME=VALUE"));

	Ok(())
}

#[test]
fn verbose_prints_summary() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.t.md"), TEMPLATE)?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("--verbose")
		.arg("-s")
		.arg("title=Demo")
		.assert()
		.success()
		.stdout("# Demo\nHello <!-- outlet: name -->.")
		.stderr(predicate::str::contains("Composition summary"))
		.stderr(predicate::str::contains("Unmatched slots"))
		.stderr(predicate::str::contains("name"));

	Ok(())
}

#[test]
fn output_flag_is_relative_to_process_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let slots = tmp.path().join("slots");
	std::fs::create_dir_all(&slots)?;
	std::fs::write(tmp.path().join("page.t.md"), "<!-- outlet: body -->")?;
	std::fs::write(slots.join("body.md"), "from slots")?;

	common::outlet_cmd()
		.current_dir(tmp.path())
		.arg("page.t.md")
		.arg("--cwd")
		.arg("slots")
		.arg("-s")
		.arg("body=@body.md")
		.arg("-o")
		.arg("out.md")
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(tmp.path().join("out.md"))?, "from slots");
	assert!(!slots.join("out.md").exists());

	Ok(())
}
