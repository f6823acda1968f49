use std::fmt::Debug;

use log::trace;

use super::Token;
use crate::common::error::{ParseError, SymbolResult};

// Segment
//------------------------------------------------------------------------------

/// Run of consecutive tokens assigned to one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<M> {
    pub mode: M,
    pub start: usize,
    pub len: usize,
}

impl<M> Segment<M> {
    pub fn new(mode: M, start: usize, len: usize) -> Self {
        Self { mode, start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn tokens<'a>(&self, tokens: &'a [Token]) -> &'a [Token] {
        &tokens[self.start..self.end()]
    }
}

// Pass
//------------------------------------------------------------------------------

/// One analyzer pass. Passes run in priority order; each one claims runs of tokens for its
/// mode so that later passes cannot re-match them.
#[derive(Clone, Copy)]
pub struct Pass<M> {
    pub mode: M,
    // Shortest run worth latching into the mode
    pub min_run: usize,
    pub accepts: fn(Token) -> bool,
    // Leading tokens of a maximal run to claim, zero when the mode isn't cheaper
    pub claim: fn(&[Token]) -> usize,
}

impl<M> Pass<M> {
    pub fn claim_all(run: &[Token]) -> usize {
        run.len()
    }
}

// Mode set
//------------------------------------------------------------------------------

/// Passes, by priority index, whose alphabet holds a token. One token may belong to several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSet(u32);

impl ModeSet {
    pub fn of<M>(t: Token, passes: &[Pass<M>]) -> Self {
        debug_assert!(passes.len() <= 32, "Too many passes: {}", passes.len());

        let bits = passes
            .iter()
            .enumerate()
            .filter(|(_, p)| (p.accepts)(t))
            .fold(0, |acc, (i, _)| acc | 1 << i);
        Self(bits)
    }

    pub fn contains(self, pass: usize) -> bool {
        (self.0 >> pass) & 1 == 1
    }
}

// Analyzer
//------------------------------------------------------------------------------

/// Partitions `tokens` into segments ordered by start position.
///
/// For every pass the maximal unclaimed runs of accepted tokens are visited longest first
/// (ties by position). Runs shorter than the pass minimum are skipped, the rest are offered
/// to the pass claim function. Tokens left unclaimed after the last pass take the fallback
/// mode, and adjacent segments of the same mode are merged.
pub fn analyze<M: Copy + Eq + Debug>(
    tokens: &[Token],
    passes: &[Pass<M>],
    fallback: fn(Token) -> M,
) -> SymbolResult<Vec<Segment<M>>> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyData.into());
    }

    let sets = tokens.iter().map(|&t| ModeSet::of(t, passes)).collect::<Vec<_>>();
    let mut claims: Vec<Option<M>> = vec![None; tokens.len()];
    for (index, pass) in passes.iter().enumerate() {
        let mut runs = unclaimed_runs(&sets, &claims, index);
        runs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (start, len) in runs {
            if len < pass.min_run {
                continue;
            }
            let claimed = (pass.claim)(&tokens[start..start + len]);
            debug_assert!(claimed <= len, "Claimed beyond the run: {claimed} > {len}");
            if claimed > 0 {
                trace!("Pass {:?} claimed {claimed} tokens at {start}", pass.mode);
                claims[start..start + claimed].fill(Some(pass.mode));
            }
        }
    }

    let modes = claims
        .iter()
        .zip(tokens)
        .map(|(claim, &t)| claim.unwrap_or_else(|| fallback(t)))
        .collect::<Vec<_>>();
    Ok(build_segments(&modes))
}

/// Assigns every token to `mode`, except designators which go to `eci`.
pub fn analyze_forced<M: Copy + Eq>(
    tokens: &[Token],
    mode: M,
    eci: M,
    accepts: fn(Token) -> bool,
    name: &'static str,
) -> SymbolResult<Vec<Segment<M>>> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyData.into());
    }

    let mut modes = Vec::with_capacity(tokens.len());
    for (position, &t) in tokens.iter().enumerate() {
        match t {
            Token::Eci(_) => modes.push(eci),
            _ if accepts(t) => modes.push(mode),
            _ => return Err(ParseError::Unencodable { position, mode: name }.into()),
        }
    }
    Ok(build_segments(&modes))
}

// (start, len) of maximal runs of unclaimed tokens in the alphabet of `pass`
fn unclaimed_runs<M>(sets: &[ModeSet], claims: &[Option<M>], pass: usize) -> Vec<(usize, usize)> {
    let mut runs = vec![];
    let mut start = None;
    for (i, (set, claim)) in sets.iter().zip(claims).enumerate() {
        let free = claim.is_none() && set.contains(pass);
        match (free, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, sets.len() - s));
    }
    runs
}

fn build_segments<M: Copy + Eq>(modes: &[M]) -> Vec<Segment<M>> {
    let mut segs: Vec<Segment<M>> = vec![];
    for (i, &m) in modes.iter().enumerate() {
        match segs.last_mut() {
            Some(seg) if seg.mode == m => seg.len += 1,
            _ => segs.push(Segment::new(m, i, 1)),
        }
    }
    segs
}
