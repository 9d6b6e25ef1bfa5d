use clap::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::io::{BufRead, Write};

lazy_static! {
    static ref TRANSCRIPT_ID_RE: Regex =
        Regex::new(r#"transcript_id\s*"(\S+)""#).unwrap();
}

pub fn make_subcommand() -> Command {
    Command::new("filter")
        .about("Keep GTF lines whose transcript_id is whitelisted")
        .after_help(
            r###"
Reads a GTF file and a label file with one transcript id per line, and
writes back only the GTF lines whose transcript_id attribute appears in
the label file. Lines without the attribute are dropped.

Examples:
  pafgtf filter in.gtf keep.txt -o out.gtf
"###,
        )
        .arg(
            Arg::new("infile")
                .help("Input GTF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("labels")
                .help("Transcript id label file, one id per line")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output GTF file")
                .default_value("stdout"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let labels = args.get_one::<String>("labels").unwrap();
    let output = args.get_one::<String>("output").unwrap();

    let mut wanted: HashSet<String> = HashSet::new();
    for line in intspan::reader(labels).lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            wanted.insert(id.to_string());
        }
    }

    let reader = intspan::reader(infile);
    let mut writer = intspan::writer(output);
    for line in reader.lines() {
        let line = line?;
        if let Some(caps) = TRANSCRIPT_ID_RE.captures(&line) {
            if wanted.contains(&caps[1]) {
                writeln!(writer, "{}", line)?;
            }
        }
    }

    Ok(())
}
