use jitsig_config::SIG_MATCH_TARGET;
use jitsig_model::CandidateMember;

use crate::generics::types_equal_modulo_generics;
use crate::parts::SignatureParts;

/// The winning line of [`score_best_line`].
///
/// `index` is 0 when nothing scored, same as when line 0 wins; check
/// [`BestMatch::is_match`] before trusting it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestMatch {
    pub index: usize,
    pub score: usize,
}

impl BestMatch {
    pub fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// Ranks disassembler declaration lines against a known member.
///
/// A line is only scored when it names the member and agrees on name,
/// modifiers and arity. Its score is the number of parameter positions plus
/// the return type that agree, tolerating erased type variables. Lines are
/// visited in order and only a strictly higher score replaces the best so
/// far, so the earliest of equally scored lines wins.
pub fn score_best_line<S: AsRef<str>>(member: &CandidateMember, lines: &[S]) -> BestMatch {
    let mut best = BestMatch::default();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if !line.contains(member.name.as_str()) {
            continue;
        }

        let parts = match SignatureParts::from_bytecode_signature(&member.class_name, line) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::debug!(target: SIG_MATCH_TARGET, line, error = %err, "skipping unparsable line");
                continue;
            }
        };

        if parts.member_name != member.name
            || parts.modifier != member.modifier
            || parts.param_types.len() != member.param_types.len()
        {
            continue;
        }

        let matched_params = member
            .param_types
            .iter()
            .zip(&parts.param_types)
            .filter(|(known, parsed)| types_equal_modulo_generics(known, parsed, &parts.generics))
            .count();
        let matched_return = usize::from(types_equal_modulo_generics(
            &member.return_type,
            &parts.return_type,
            &parts.generics,
        ));
        let score = matched_params + matched_return;

        tracing::trace!(target: SIG_MATCH_TARGET, index, score, line, "scored line");
        if score > best.score {
            best = BestMatch { index, score };
        }
    }

    best
}

/// The best scoring line, or `None` when no line scored at all.
pub fn find_best_match_for_member_signature<'a, S: AsRef<str>>(
    member: &CandidateMember,
    lines: &'a [S],
) -> Option<&'a str> {
    let best = score_best_line(member, lines);
    best.is_match().then(|| lines[best.index].as_ref())
}
