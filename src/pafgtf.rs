extern crate clap;
use clap::*;

mod cmd_pafgtf;

fn main() -> anyhow::Result<()> {
    let app = Command::new("pafgtf")
        .version(crate_version!())
        .about("`pafgtf` - assemble long-read PAF alignments into a gene-clustered GTF")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_pafgtf::make::make_subcommand())
        .subcommand(cmd_pafgtf::filter::make_subcommand())
        .after_help(
            r###"Subcommands:

* make   - PAF alignments to a gene-clustered GTF
* filter - keep GTF lines whose transcript_id is whitelisted

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("make", sub_matches)) => cmd_pafgtf::make::execute(sub_matches),
        Some(("filter", sub_matches)) => cmd_pafgtf::filter::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
