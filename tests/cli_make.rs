use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/paf").join(name)
}

const BASIC_GTF: &str = "\
chr1\tpafgtf\texon\t1001\t1150\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"r1\";
chr1\tpafgtf\texon\t1351\t1500\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"r1\";
chr1\tpafgtf\texon\t1101\t1400\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"r2\";
chr2\tpafgtf\texon\t2001\t2250\t.\t+\t0\tgene_id \"GENE2\"; transcript_id \"r3\";
";

#[test]
fn command_make_basic() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("basic.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make").arg(fixture("basic.paf")).arg("-o").arg(&output);
    cmd.assert().success();

    // r1/r2 overlap on chr1 and share GENE1; r3 on chr2 opens GENE2.
    // The low-identity and secondary records never appear.
    let content = fs::read_to_string(&output)?;
    assert_eq!(content, BASIC_GTF);
    assert!(!content.contains("lowid"));
    assert!(!content.contains("sec"));

    Ok(())
}

#[test]
fn command_make_gz_input() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("basic.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make").arg(fixture("basic.paf.gz")).arg("-o").arg(&output);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&output)?, BASIC_GTF);

    Ok(())
}

#[test]
fn command_make_chimera_suppressed() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("chim.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make").arg(fixture("chimera.paf")).arg("-o").arg(&output);
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    let expected = "\
chr3\tpafgtf\texon\t101\t400\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"plain\";
";
    assert_eq!(content, expected);

    Ok(())
}

#[test]
fn command_make_include_chimeras() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("chim.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make")
        .arg(fixture("chimera.paf"))
        .arg("--include-chimeras")
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    let expected = "\
chr1\tpafgtf\texon\t1\t300\t.\t+\t0\tgene_id \"GENE1\"; transcript_id \"chim_p1\";
chr2\tpafgtf\texon\t5001\t5300\t.\t+\t0\tgene_id \"GENE2\"; transcript_id \"chim_p2\";
chr3\tpafgtf\texon\t101\t400\t.\t+\t0\tgene_id \"GENE3\"; transcript_id \"plain\";
";
    assert_eq!(content, expected);

    Ok(())
}

#[test]
fn command_make_prefixes() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("multi.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make")
        .arg(fixture("basic.paf"))
        .arg(fixture("chimera.paf"))
        .arg("--prefix")
        .arg("a")
        .arg("--prefix")
        .arg("b")
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    assert!(content.contains("transcript_id \"a_r1\";"));
    assert!(content.contains("transcript_id \"b_plain\";"));
    // Gene ids carry the prefix of the transcript seeding the gene, and
    // numbering runs through the whole output.
    assert!(content.contains("gene_id \"a_GENE1\";"));
    assert!(content.contains("gene_id \"a_GENE2\";"));
    assert!(content.contains("gene_id \"b_GENE3\";"));

    Ok(())
}

#[test]
fn command_make_prefix_count_mismatch() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make")
        .arg(fixture("basic.paf"))
        .arg(fixture("chimera.paf"))
        .arg("--prefix")
        .arg("a");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("prefix"));

    Ok(())
}

#[test]
fn command_make_numeric_prefixes_for_multiple_sources() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("multi.gtf");

    let mut cmd = Command::cargo_bin("pafgtf")?;
    cmd.arg("make")
        .arg(fixture("basic.paf"))
        .arg(fixture("chimera.paf"))
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    assert!(content.contains("transcript_id \"0_r1\";"));
    assert!(content.contains("transcript_id \"1_plain\";"));

    Ok(())
}
