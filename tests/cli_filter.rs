use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/gtf").join(name)
}

#[test]
fn command_filter_whitelist() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("filtered.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("filter")
        .arg(fixture("annot.gtf"))
        .arg(fixture("keep.txt"))
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    let expected = "\
chr1\tpafgtf\texon\t1001\t1150\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"r1\";
chr1\tpafgtf\texon\t1351\t1500\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"r1\";
chr2\tpafgtf\texon\t2001\t2250\t.\t+\t0\tgene_id \"GENE2\"; transcript_id \"r3\";
";
    assert_eq!(content, expected);

    Ok(())
}

#[test]
fn command_filter_empty_whitelist() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let labels = temp.path().join("none.txt");
    fs::write(&labels, "")?;
    let output = temp.path().join("filtered.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("filter")
        .arg(fixture("annot.gtf"))
        .arg(&labels)
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&output)?, "");

    Ok(())
}
