use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const BINARY: &str = "fastaload";
const FIVE_RECORDS: &str = "tests/data/five.fasta";
const HEADLESS: &str = "tests/data/headless.fasta";
const EMPTY: &str = "tests/data/empty.fasta";

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn fastaload() -> Command {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.env("RUST_LOG", "info");
    cmd
}

#[test]
fn single_load() -> TestResult {
    fastaload()
        .arg(FIVE_RECORDS)
        .assert()
        .success()
        .stdout(predicate::str::contains(". 5 FASTA records"))
        .stdout(predicate::str::contains("seconds taken for processing total"))
        .stdout(predicate::str::contains(
            "5 records processed from 'tests/data/five.fasta'",
        ));

    Ok(())
}

#[test]
fn repeated_load_reports_same_count_each_time() -> TestResult {
    let output = fastaload().args(["-R", "3", FIVE_RECORDS]).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.matches(" 5 FASTA records\n").count(), 3, "{stdout}");
    assert!(stdout.contains("On average: 0 minutes, "), "{stdout}");

    Ok(())
}

#[test]
fn repeats_only_apply_to_later_files() -> TestResult {
    let output = fastaload()
        .args([EMPTY, "-R", "2", FIVE_RECORDS])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.matches(" 0 FASTA records\n").count(), 1, "{stdout}");
    assert_eq!(stdout.matches(" 5 FASTA records\n").count(), 2, "{stdout}");

    Ok(())
}

#[test]
fn records_from_temporary_file() -> TestResult {
    let file = assert_fs::NamedTempFile::new("example.fa")?;
    file.write_str(">seq1\nACGT\nACGT\n>seq2\nTTTT\n")?;

    fastaload()
        .args(["--progress", "0"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(" 2 FASTA records\n"))
        .stdout(predicate::str::contains("2 records processed from"));

    file.close()?;
    Ok(())
}

#[test]
fn file_doesnt_exist() -> TestResult {
    fastaload()
        .arg("file_which_does_not_exist.fasta")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unable to open file file_which_does_not_exist.fasta",
        ))
        .stderr(predicate::str::contains("No such file or directory"))
        .stderr(predicate::str::contains("No data processed"));

    Ok(())
}

#[test]
fn malformed_file_reports_line() -> TestResult {
    fastaload()
        .arg(HEADLESS)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Failure at line 1 of 'tests/data/headless.fasta'",
        ))
        .stderr(predicate::str::contains("sequence data found before any header"));

    Ok(())
}

#[test]
fn failed_file_does_not_stop_later_files() -> TestResult {
    fastaload()
        .args([HEADLESS, FIVE_RECORDS])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "5 records processed from 'tests/data/five.fasta'",
        ))
        .stderr(predicate::str::contains("Processing 'tests/data/headless.fasta' failed"));

    Ok(())
}

#[test]
fn unknown_option_is_only_a_warning() -> TestResult {
    fastaload()
        .args(["-x", FIVE_RECORDS])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown option '-x'"))
        .stderr(predicate::str::contains(
            "Prints timing of loading and storing FASTA records.",
        ))
        .stdout(predicate::str::contains("5 records processed"));

    Ok(())
}

#[test]
fn no_files_given() -> TestResult {
    fastaload()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No data processed"));

    Ok(())
}

#[test]
fn bad_repeat_count() -> TestResult {
    for args in [["-R", "many", FIVE_RECORDS], ["-R", "0", FIVE_RECORDS]] {
        fastaload()
            .args(args)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("FASTA records").not());
    }

    fastaload().args([FIVE_RECORDS, "-R"]).assert().code(1);

    Ok(())
}

#[test]
fn help_succeeds() -> TestResult {
    fastaload()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-R, --repeats <REPEATS>"));

    Ok(())
}
