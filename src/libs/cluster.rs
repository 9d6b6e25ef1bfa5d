use std::io::Write;

use anyhow::Result;
use coitrees::{BasicCOITree, Interval, IntervalTree};

use crate::libs::transcript::{Containment, Transcript};

/// Source column of emitted GTF lines.
pub const SOURCE_LABEL: &str = "pafgtf";

#[derive(Debug, Clone, Default)]
pub struct ClusterOpts {
    pub dangling_edge_threshold: i32,
    pub strand_specific: bool,
}

/// Interval index over the members of the gene under construction. Inserts
/// and removals invalidate the tree, which is rebuilt on the next query;
/// genes hold few transcripts, so rebuilds stay cheap. Removed members
/// leave a tombstone so indices handed out by `overlapping` stay valid.
pub struct GeneIndex {
    members: Vec<Option<Transcript>>,
    tree: Option<BasicCOITree<usize, u32>>,
}

impl GeneIndex {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            tree: None,
        }
    }

    pub fn insert(&mut self, transcript: Transcript) {
        self.members.push(Some(transcript));
        self.tree = None;
    }

    pub fn remove(&mut self, idx: usize) {
        self.members[idx] = None;
        self.tree = None;
    }

    pub fn get(&self, idx: usize) -> Option<&Transcript> {
        self.members.get(idx).and_then(|m| m.as_ref())
    }

    /// Indices of live members whose span covers `pos`, in insertion order.
    pub fn overlapping(&mut self, pos: i32) -> Vec<usize> {
        if self.tree.is_none() {
            let intervals: Vec<Interval<usize>> = self
                .members
                .iter()
                .enumerate()
                .filter_map(|(i, m)| m.as_ref().map(|t| Interval::new(t.start, t.end, i)))
                .collect();
            self.tree = Some(BasicCOITree::new(&intervals));
        }
        let mut hits = Vec::new();
        if let Some(tree) = &self.tree {
            tree.query(pos, pos, |iv| hits.push(iv.metadata));
        }
        hits.sort_unstable();
        hits
    }

    /// Live members in insertion order, which is the positional sort order
    /// minus any replacements.
    pub fn members(&self) -> impl Iterator<Item = &Transcript> {
        self.members.iter().flatten()
    }
}

impl Default for GeneIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition a positionally sorted transcript sequence into genes and write
/// one GTF exon line per retained transcript exon.
///
/// A gene grows while each next transcript overlaps the gene's interval
/// index at its start coordinate on the same chromosome (and strand, in
/// strand-specific mode). Transcripts contained in an existing member are
/// dropped as redundant; a member differing only by a shorter terminal exon
/// is replaced.
pub fn cluster_transcripts<W: Write>(
    transcripts: Vec<Transcript>,
    opts: &ClusterOpts,
    writer: &mut W,
) -> Result<()> {
    let mut iter = transcripts.into_iter();
    let mut first = match iter.next() {
        Some(t) => t,
        None => return Ok(()),
    };

    let mut gene_number = 1;
    let mut gene_id = format!("{}GENE{}", first.prefix, gene_number);
    first.gene_id = Some(gene_id.clone());

    let mut index = GeneIndex::new();
    let mut prev_chromosome = first.chromosome.clone();
    let mut prev_strand = first.strand;
    index.insert(first);

    for mut curr in iter {
        let overlapping = index.overlapping(curr.start);
        let same_gene = !overlapping.is_empty()
            && curr.chromosome == prev_chromosome
            && (!opts.strand_specific || curr.strand == prev_strand);

        prev_chromosome = curr.chromosome.clone();
        prev_strand = curr.strand;

        if same_gene {
            let mut is_contained = false;
            for idx in overlapping {
                let member = match index.get(idx) {
                    Some(m) => m,
                    None => continue,
                };
                match curr.is_contained_in(member, opts.dangling_edge_threshold) {
                    Containment::Contained => {
                        is_contained = true;
                        break;
                    }
                    Containment::LastExonLonger => {
                        // The same transcript observed with a longer
                        // terminal exon replaces the shorter member.
                        let replace = member.exons.len() == curr.exons.len()
                            && curr.start - member.start <= opts.dangling_edge_threshold;
                        if replace {
                            index.remove(idx);
                            break;
                        }
                    }
                    Containment::NotContained => {}
                }
            }
            if !is_contained {
                curr.gene_id = Some(gene_id.clone());
                index.insert(curr);
            }
        } else {
            flush_gene(&index, writer)?;
            gene_number += 1;
            gene_id = format!("{}GENE{}", curr.prefix, gene_number);
            curr.gene_id = Some(gene_id.clone());
            index = GeneIndex::new();
            index.insert(curr);
        }
    }
    flush_gene(&index, writer)?;

    Ok(())
}

fn flush_gene<W: Write>(index: &GeneIndex, writer: &mut W) -> Result<()> {
    for transcript in index.members() {
        write_transcript(transcript, writer)?;
    }
    Ok(())
}

/// One GTF exon line per exon, ascending by start.
pub fn write_transcript<W: Write>(transcript: &Transcript, writer: &mut W) -> Result<()> {
    let gene_id = transcript.gene_id.as_deref().unwrap_or_default();
    for exon in &transcript.exons {
        writeln!(
            writer,
            "{}\t{}\texon\t{}\t{}\t.\t{}\t0\tgene_id \"{}\"; transcript_id \"{}\";",
            transcript.chromosome,
            SOURCE_LABEL,
            exon.start,
            exon.end,
            transcript.strand,
            gene_id,
            transcript.id
        )?;
    }
    Ok(())
}
