/// Outcome of scanning a research reply for a candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A line starting with `http`, taken verbatim. Not yet validated.
    Url(String),
    /// The agent explicitly answered that nothing suitable exists.
    ExplicitNone,
    /// No usable answer in the reply. Not an error, just nothing to apply.
    Missing,
}

/// The exact reply the agent is instructed to give when it finds nothing.
/// Strict equality on the trimmed reply: any other casing or decoration
/// falls through to the line scan.
const NONE_SENTINEL: &str = "NONE";

/// Locate the candidate URL in a free-form research reply.
///
/// Lines are scanned from the end toward the start (the query asks for the
/// URL on the last line), so the last `http`-prefixed line wins. Anything
/// beyond the prefix check is the validator's job.
pub fn extract_candidate(response: &str) -> Candidate {
    if response == NONE_SENTINEL {
        return Candidate::ExplicitNone;
    }

    for line in response.lines().rev() {
        let line = line.trim();
        if line.starts_with("http") {
            return Candidate::Url(line.to_string());
        }
    }

    Candidate::Missing
}
