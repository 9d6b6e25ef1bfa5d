use indexmap::IndexMap;

use crate::libs::paf::{self, PafRecord};
use crate::libs::transcript::Transcript;

/// A candidate shorter than this is dropped unless the transcript already
/// holds an exon.
pub const MIN_EXON_LEN: i32 = 20;

/// Hard floor on matched bases. Alignments below it are too partial to feed
/// into gene clustering.
pub const MIN_MATCHING: i32 = 200;

#[derive(Debug, Clone)]
pub struct AssembleOpts {
    pub indel_threshold: i32,
    pub min_identity: f32,
    pub include_chimeras: bool,
}

impl Default for AssembleOpts {
    fn default() -> Self {
        Self {
            indel_threshold: 10,
            min_identity: 0.99,
            include_chimeras: false,
        }
    }
}

/// Turn one alignment record into a candidate transcript, or nothing when a
/// filter rejects it. Rejections are expected and silent.
pub fn transcript_from_record(
    rec: &PafRecord,
    prefix: &str,
    opts: &AssembleOpts,
) -> Option<Transcript> {
    if rec.calc_ident() < opts.min_identity {
        return None;
    }
    if !rec.is_primary() {
        return None;
    }
    let cigar = rec.cigar()?;
    let ops = paf::parse_cigar(cigar);
    if !paf::max_indel_ok(&ops, opts.indel_threshold) {
        return None;
    }

    let mut transcript = Transcript::new(
        &rec.q_name,
        rec.trans_strand(),
        &rec.t_name,
        rec.match_count,
        prefix,
    );

    // Walk the CIGAR with a cursor on the target. M and D consume target
    // bases; N closes the current exon candidate and jumps the gap; I and
    // any clipping ops leave the cursor alone.
    let mut exon_start = rec.t_start + 1;
    let mut exon_end = exon_start - 1;
    for c in &ops {
        match c.op {
            b'M' | b'D' => exon_end += c.len,
            b'N' => {
                close_candidate(&mut transcript, exon_start, exon_end);
                exon_start = exon_end + c.len + 1;
                exon_end = exon_start - 1;
            }
            _ => {}
        }
    }
    close_candidate(&mut transcript, exon_start, exon_end);

    if transcript.has_an_exon() {
        Some(transcript)
    } else {
        None
    }
}

fn close_candidate(transcript: &mut Transcript, start: i32, end: i32) {
    if end - start >= MIN_EXON_LEN || (transcript.has_an_exon() && end > start) {
        transcript.add_exon(start, end);
    }
}

/// Per-source scan state. Records must arrive in file order: consecutive
/// records sharing a query name are parts of one chimeric alignment, and
/// the merger either suppresses them or renames them `_pN`.
pub struct SourceScanner {
    opts: AssembleOpts,
    prefix: String,
    transcripts: IndexMap<String, Transcript>,
    last_id: Option<String>,
    /// Whether the transcript under `last_id` may still stand alone, i.e.
    /// has not been proven chimeric by a repeated query name.
    last_standalone: bool,
    part_num: u32,
}

impl SourceScanner {
    pub fn new(prefix: &str, opts: &AssembleOpts) -> Self {
        Self {
            opts: opts.clone(),
            prefix: prefix.to_string(),
            transcripts: IndexMap::new(),
            last_id: None,
            last_standalone: false,
            part_num: 1,
        }
    }

    /// Parse one input line and feed any resulting transcript through the
    /// chimera merger. Malformed lines are skipped.
    pub fn scan_line(&mut self, line: &str) {
        let rec: PafRecord = match line.parse() {
            Ok(rec) => rec,
            Err(_) => return,
        };
        if let Some(transcript) = transcript_from_record(&rec, &self.prefix, &self.opts) {
            self.accept(transcript);
        }
    }

    fn accept(&mut self, transcript: Transcript) {
        let id = transcript.id.clone();
        if self.last_id.as_deref() != Some(id.as_str()) {
            if !self.last_standalone {
                self.last_standalone = true;
                self.part_num = 1;
            }
            self.insert_if_passing(transcript);
            self.last_id = Some(id);
        } else if self.opts.include_chimeras {
            if self.last_standalone {
                // First repeat of this id: retroactively rename the earlier
                // record as part 1, moving its entry to the new key.
                let renamed = format!("{}_p{}", id, self.part_num);
                if let Some(mut prev) = self.transcripts.shift_remove(&id) {
                    prev.id = renamed.clone();
                    self.transcripts.insert(renamed, prev);
                }
                self.last_standalone = false;
            }
            self.part_num += 1;
            let mut part = transcript;
            part.id = format!("{}_p{}", part.id, self.part_num);
            self.insert_if_passing(part);
        } else if self.last_standalone {
            // A chimerically mapped read must not be reported as one simple
            // transcript.
            self.transcripts.shift_remove(&id);
            self.last_standalone = false;
        }
    }

    fn insert_if_passing(&mut self, transcript: Transcript) {
        if transcript.num_matching >= MIN_MATCHING {
            self.transcripts
                .entry(transcript.id.clone())
                .or_insert(transcript);
        }
    }

    pub fn finish(self) -> IndexMap<String, Transcript> {
        self.transcripts
    }
}

/// Prefix for source `i` of `num_sources`: the supplied prefix when given,
/// a numeric prefix when several unprefixed sources would collide, nothing
/// for a lone source.
pub fn source_prefix(i: usize, num_sources: usize, prefixes: Option<&[String]>) -> String {
    match prefixes {
        Some(p) => format!("{}_", p[i]),
        None if num_sources == 1 => String::new(),
        None => format!("{}_", i),
    }
}
