use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().to_path_buf()
}

fn ccolon() -> Command {
    let mut cmd = Command::cargo_bin("ccolon").unwrap();
    cmd.env_remove("CCOLON_DUMP");
    cmd
}

fn write_program(dir: &tempfile::TempDir, name: &str, src: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, src).unwrap();
    path
}

#[test]
fn runs_hello_example() {
    let root = workspace_root();
    ccolon()
        .arg(root.join("demos/hello.ccolon"))
        .assert()
        .success()
        .stdout("Hello, world!\n");
}

#[test]
fn runs_arithmetic_example() {
    let root = workspace_root();
    ccolon()
        .arg(root.join("demos/arithmetic.ccolon"))
        .assert()
        .success()
        .stdout("a = 14\nb = 20\nc = 3\nd = -4\njoined: 1420\nsum: 34\n");
}

#[test]
fn runs_conditionals_example() {
    let root = workspace_root();
    ccolon()
        .arg(root.join("demos/conditionals.ccolon"))
        .assert()
        .success()
        .stdout("3 is less than 5\nno coercion in ==\n");
}

#[test]
fn greet_example_reads_stdin() {
    let root = workspace_root();
    ccolon()
        .arg(root.join("demos/greet.ccolon"))
        .write_stdin("Ada\n1990\n")
        .assert()
        .success()
        .stdout(
            "What is your name? Birth year? Hello, Ada!\n\
             In 2030 you will be 40.\n\
             Your name tag: Ada\n",
        );
}

#[test]
fn parse_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad_path = write_program(&tmp_dir, "bad.ccolon", "var int x 5\n");

    ccolon()
        .arg(bad_path)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("Expected OP '=', found NUMBER '5'"))
        .stderr(predicate::str::contains("line 1, column 11"));
}

#[test]
fn runtime_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(
        &tmp_dir,
        "div.ccolon",
        "console.println(\"before\")\nconsole.println(1 / 0)\nconsole.println(\"after\")\n",
    );

    ccolon()
        .arg(path)
        .assert()
        .failure()
        .stdout("before\n")
        .stderr(predicate::str::contains("Runtime error"))
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn lex_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(&tmp_dir, "lex.ccolon", "var int x = 1 # 2\n");

    ccolon()
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lex error"))
        .stderr(predicate::str::contains("Unexpected character '#'"));
}

#[test]
fn missing_file_is_nonzero() {
    ccolon()
        .arg("definitely/not/here.ccolon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn dumps_tokens_without_running() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(&tmp_dir, "tokens.ccolon", "var int x = 1\nconsole.println(x)\n");

    ccolon()
        .arg(path)
        .args(["--dump", "tokens"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "KEYWORD(var)\nKEYWORD(int)\nID(x)\nOP(=)\nNUMBER(1)\nID(console)\n",
        ))
        .stdout(predicate::str::ends_with("ID(x)\nOP())\n"));
}

#[test]
fn dump_without_file_is_rejected() {
    ccolon()
        .args(["--dump", "ast"])
        .write_stdin(":quit\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("<PATH>"));
}

#[test]
fn dumps_ast_deterministically() {
    let root = workspace_root();
    let run = || {
        ccolon()
            .arg(root.join("demos/conditionals.ccolon"))
            .env("CCOLON_DUMP", "ast")
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let text = String::from_utf8(first.stdout).unwrap();
    assert!(text.starts_with("VarDecl(type=int, name=small, value=Int(3))\n"));
    assert!(text.contains("FuncDef(name=report, body=["));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn unknown_methods_warn_unless_quiet() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(&tmp_dir, "warn.ccolon", "console.shout(\"hi\")\nconsole.println(\"done\")\n");

    ccolon()
        .arg(&path)
        .assert()
        .success()
        .stdout("done\n")
        .stderr(predicate::str::contains("unknown method 'shout' on receiver 'console'"));

    ccolon()
        .arg(&path)
        .arg("--quiet")
        .assert()
        .success()
        .stdout("done\n")
        .stderr("");
}
