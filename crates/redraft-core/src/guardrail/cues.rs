//! Cue tables and the proximity matcher.
//!
//! Phrases are written in normalised form: lower case, punctuation folded to
//! spaces (so `can't` is `can t`).

use std::ops::Range;

use super::verdict::ReasonCode;

type Phrase = &'static [&'static str];

/// Tokens allowed between a leading and a trailing cue.
pub(crate) const WINDOW: usize = 6;

const EVASION_VERBS: &[Phrase] = &[
    &["bypass"], &["bypassing"], &["by", "pass"], &["evade"], &["evading"], &["evasion"],
    &["avoid"], &["avoiding"], &["beat"], &["beating"], &["fool"], &["fooling"], &["trick"],
    &["tricking"], &["dodge"], &["dodging"], &["circumvent"], &["circumventing"], &["defeat"],
    &["get", "past"], &["get", "around"], &["get", "through"], &["getting", "past"],
    &["slip", "past"], &["slip", "through"], &["sneak", "past"], &["pass"], &["passes"],
    &["passing"], &["escape"], &["hide", "from"], &["humanize"], &["humanise"],
    &["undetectable", "by"], &["undetectable", "to"], &["not", "be", "flagged", "by"],
    &["without", "being", "flagged", "by"], &["without", "triggering"],
];

const DETECTION_TARGETS: &[Phrase] = &[
    &["ai", "detector"], &["ai", "detectors"], &["ai", "detection"], &["ai", "checker"],
    &["ai", "checkers"], &["ai", "content", "detector"], &["ai", "content", "detection"],
    &["ai", "writing", "detector"], &["ai", "writing", "detection"], &["ai", "scanner"],
    &["ai", "classifier"], &["gptzero"], &["gpt", "zero"], &["zerogpt"], &["zero", "gpt"],
    &["originality", "ai"], &["copyleaks"], &["winston", "ai"], &["detected", "as", "ai"],
    &["flagged", "as", "ai"],
];

/// Detection words that say nothing about AI on their own (`anomaly detection`).
const GENERIC_DETECTION: &[Phrase] = &[
    &["detection"], &["detector"], &["detectors"], &["detected"], &["checker"], &["checkers"],
    &["scanner"], &["classifier"],
];

const AI_QUALIFIERS: &[Phrase] = &[
    &["ai"], &["gpt"], &["chatgpt"], &["llm"], &["gptzero"], &["zerogpt"], &["copyleaks"],
    &["chatbot"], &["ai", "generated"], &["machine", "generated"],
];

/// Tokens allowed between a generic detection word and its qualifier.
const QUALIFIER_REACH: usize = 3;

const PLAGIARISM_TARGETS: &[Phrase] = &[
    &["plagiarism", "checker"], &["plagiarism", "checkers"], &["plagiarism", "check"],
    &["plagiarism", "checks"], &["plagiarism", "checking"], &["plagiarism", "detection"],
    &["plagiarism", "detector"], &["plagiarism", "detectors"], &["plagiarism", "software"],
    &["plagiarism", "scanner"], &["plagiarism", "scan"], &["plagiarism", "filter"],
    &["turnitin"], &["copyscape"], &["safeassign"], &["safe", "assign"], &["ithenticate"],
    &["unicheck"], &["similarity", "report"], &["similarity", "score"],
    &["similarity", "check"], &["similarity", "checker"], &["originality", "check"],
    &["originality", "report"], &["flagged", "for", "plagiarism"],
    &["flagged", "as", "plagiarism"], &["flagged", "as", "plagiarized"],
    &["detected", "as", "plagiarism"], &["detected", "as", "plagiarized"],
];

const NEGATED_DETECTION: &[Phrase] = &[
    &["can", "t", "detect"], &["cant", "detect"], &["cannot", "detect"], &["won", "t", "detect"],
    &["wont", "detect"], &["doesn", "t", "detect"], &["does", "not", "detect"],
    &["will", "not", "detect"], &["not", "detect"], &["can", "t", "flag"], &["cannot", "flag"],
    &["won", "t", "flag"], &["doesn", "t", "flag"], &["not", "flag"], &["won", "t", "catch"],
    &["can", "t", "catch"], &["not", "catch"], &["can", "t", "tell"], &["cannot", "tell"],
];

const SUBMISSION_VERBS: &[Phrase] = &[
    &["submit"], &["submitting"], &["turn", "in"], &["turn", "it", "in"], &["hand", "in"],
    &["hand", "it", "in"], &["pass", "off"], &["pass", "it", "off"], &["pass", "this", "off"],
    &["claim"], &["present"],
];

const OWNERSHIP_CLAIMS: &[Phrase] = &[&["as", "my", "own"], &["as", "mine"]];

const AUTHORITIES: &[Phrase] = &[
    &["professor"], &["prof"], &["teacher"], &["instructor"], &["lecturer"], &["tutor"],
    &["examiner"], &["grader"], &["ta"], &["school"], &["university"],
];

const CONCEALMENT_AFTER: &[Phrase] = &[
    &["knowing"], &["noticing"], &["finding", "out"], &["won", "t", "know"], &["wont", "know"],
    &["will", "never", "know"], &["never", "know"], &["can", "t", "tell"], &["cannot", "tell"],
    &["won", "t", "notice"], &["doesn", "t", "notice"], &["won", "t", "find", "out"],
    &["never", "find", "out"], &["not", "notice"], &["not", "know"],
];

const CONCEALMENT_BEFORE: &[Phrase] = &[
    &["hide"], &["conceal"], &["keep", "it", "from"], &["keep", "this", "from"],
];

const STANDALONE_DETECTION: &[Phrase] = &[
    &["undetectable"], &["undetectable", "ai"], &["ai", "humanizer"], &["ai", "humaniser"],
    &["humanize", "ai"], &["humanise", "ai"],
];

const STANDALONE_DISHONESTY: &[Phrase] = &[
    &["write", "my", "exam"], &["take", "my", "exam"], &["take", "my", "test"],
    &["do", "my", "exam"], &["without", "getting", "caught"], &["not", "get", "caught"],
    &["someone", "else", "s", "essay"], &["someone", "else", "s", "work"],
    &["classmate", "s", "essay"], &["remove", "the", "citations", "so"],
    &["remove", "citations", "so"], &["hide", "that", "i", "copied"],
];

/// Phrases that always match, plus generic words that match only with a
/// qualifier within [`QUALIFIER_REACH`] tokens.
struct Cues {
    phrases: &'static [Phrase],
    generic: &'static [Phrase],
    qualifiers: &'static [Phrase],
}

impl Cues {
    const fn plain(phrases: &'static [Phrase]) -> Self {
        Self {
            phrases,
            generic: &[],
            qualifiers: &[],
        }
    }

    fn find(&self, tokens: &[String]) -> Vec<Range<usize>> {
        let mut found = occurrences(tokens, self.phrases);
        if self.generic.is_empty() {
            return found;
        }
        let qualifiers = occurrences(tokens, self.qualifiers);
        found.extend(
            occurrences(tokens, self.generic)
                .into_iter()
                .filter(|range| qualifiers.iter().any(|qualifier| near(range, qualifier))),
        );
        found
    }
}

const DETECTION_CUES: Cues = Cues {
    phrases: DETECTION_TARGETS,
    generic: GENERIC_DETECTION,
    qualifiers: AI_QUALIFIERS,
};

/// A leading cue followed within [`WINDOW`] tokens by a trailing cue.
struct ProximityRule {
    reason: ReasonCode,
    leading: Cues,
    trailing: Cues,
    /// Matches overlapping these phrases are ignored on either side.
    exclude: &'static [Phrase],
}

const PROXIMITY_RULES: &[ProximityRule] = &[
    ProximityRule {
        reason: ReasonCode::EvadeDetection,
        leading: Cues::plain(EVASION_VERBS),
        trailing: DETECTION_CUES,
        exclude: PLAGIARISM_TARGETS,
    },
    ProximityRule {
        reason: ReasonCode::EvadeDetection,
        leading: DETECTION_CUES,
        trailing: Cues::plain(NEGATED_DETECTION),
        exclude: PLAGIARISM_TARGETS,
    },
    ProximityRule {
        reason: ReasonCode::EvadePlagiarismCheck,
        leading: Cues::plain(EVASION_VERBS),
        trailing: Cues::plain(PLAGIARISM_TARGETS),
        exclude: &[],
    },
    ProximityRule {
        reason: ReasonCode::EvadePlagiarismCheck,
        leading: Cues::plain(PLAGIARISM_TARGETS),
        trailing: Cues::plain(NEGATED_DETECTION),
        exclude: &[],
    },
    ProximityRule {
        reason: ReasonCode::AcademicDishonesty,
        leading: Cues::plain(SUBMISSION_VERBS),
        trailing: Cues::plain(OWNERSHIP_CLAIMS),
        exclude: &[],
    },
    ProximityRule {
        reason: ReasonCode::AcademicDishonesty,
        leading: Cues::plain(AUTHORITIES),
        trailing: Cues::plain(CONCEALMENT_AFTER),
        exclude: &[],
    },
    ProximityRule {
        reason: ReasonCode::AcademicDishonesty,
        leading: Cues::plain(CONCEALMENT_BEFORE),
        trailing: Cues::plain(AUTHORITIES),
        exclude: &[],
    },
];

const STANDALONE_RULES: &[(ReasonCode, &[Phrase])] = &[
    (ReasonCode::EvadeDetection, STANDALONE_DETECTION),
    (ReasonCode::AcademicDishonesty, STANDALONE_DISHONESTY),
];

/// Returns the highest-precedence reason matched in the normalised tokens.
pub(crate) fn detect(tokens: &[String]) -> Option<ReasonCode> {
    let standalone = STANDALONE_RULES
        .iter()
        .filter(|(_, phrases)| !occurrences(tokens, phrases).is_empty())
        .map(|(reason, _)| *reason);
    let proximity = PROXIMITY_RULES
        .iter()
        .filter(|rule| rule.matches(tokens))
        .map(|rule| rule.reason);
    standalone.chain(proximity).min()
}

impl ProximityRule {
    fn matches(&self, tokens: &[String]) -> bool {
        let excluded = occurrences(tokens, self.exclude);
        let keep = |range: &Range<usize>| !excluded.iter().any(|other| overlaps(range, other));
        let leading: Vec<Range<usize>> = self
            .leading
            .find(tokens)
            .into_iter()
            .filter(|range| keep(range))
            .collect();
        let trailing: Vec<Range<usize>> = self
            .trailing
            .find(tokens)
            .into_iter()
            .filter(|range| keep(range))
            .collect();
        leading.iter().any(|lead| {
            trailing
                .iter()
                .any(|trail| trail.start >= lead.end && trail.start - lead.end <= WINDOW)
        })
    }
}

fn occurrences(tokens: &[String], phrases: &[Phrase]) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    for phrase in phrases {
        if phrase.is_empty() {
            continue;
        }
        for (start, window) in tokens.windows(phrase.len()).enumerate() {
            if window
                .iter()
                .zip(phrase.iter())
                .all(|(token, expected)| token.as_str() == *expected)
            {
                found.push(start..start + phrase.len());
            }
        }
    }
    found
}

fn near(range: &Range<usize>, other: &Range<usize>) -> bool {
    let gap = other
        .start
        .saturating_sub(range.end)
        .max(range.start.saturating_sub(other.end));
    gap <= QUALIFIER_REACH
}

const fn overlaps(left: &Range<usize>, right: &Range<usize>) -> bool {
    left.start < right.end && right.start < left.end
}
