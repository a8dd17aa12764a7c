//! Fixed instruction profiles for the analysis procedures.
//!
//! A profile is the natural-language instruction set for one procedure plus
//! the JSON schema its output must conform to. Profiles are constructed
//! once at startup and passed explicitly into every procedure call; nothing
//! reads them from ambient state.

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct AnalysisProfile {
    /// Stable name, used in logs and error messages.
    pub name: &'static str,
    /// Instruction set sent as the system prompt.
    pub instructions: String,
    /// JSON schema the backend response must conform to.
    pub schema: Value,
}

/// The five built-in profiles: one per analysis procedure, plus the two
/// verification phases.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    pub quantitative: AnalysisProfile,
    pub qualitative: AnalysisProfile,
    pub strategic: AnalysisProfile,
    pub claim_extraction: AnalysisProfile,
    pub evidence_assessment: AnalysisProfile,
}

impl ProfileSet {
    pub fn builtin() -> Self {
        Self {
            quantitative: quantitative(),
            qualitative: qualitative(),
            strategic: strategic(),
            claim_extraction: claim_extraction(),
            evidence_assessment: evidence_assessment(),
        }
    }
}

fn quantitative() -> AnalysisProfile {
    AnalysisProfile {
        name: "quantitative",
        instructions: "You are a venture analyst reviewing the transcript of a founder pitch \
call. Extract the business metrics the founder actually states: founder name, industry, \
funding stage, monthly recurring revenue in whole US dollars, team size, and region. Leave \
out any field the pitch does not state; never guess. Then judge whether the stated metrics \
are present and plausible for the stated stage, and return verdict PASS or FAIL with a short \
reasoning. Return only a JSON object."
            .into(),
        schema: json!({
            "type": "object",
            "properties": {
                "founder_name": {"type": ["string", "null"]},
                "industry": {"type": ["string", "null"]},
                "stage": {"type": ["string", "null"]},
                "monthly_revenue": {"type": ["integer", "null"], "minimum": 0},
                "team_size": {"type": ["integer", "null"], "minimum": 0},
                "region": {"type": ["string", "null"]},
                "verdict": {"enum": ["PASS", "FAIL"]},
                "reasoning": {"type": "string"}
            },
            "required": ["verdict", "reasoning"]
        }),
    }
}

fn qualitative() -> AnalysisProfile {
    AnalysisProfile {
        name: "qualitative",
        instructions: "You are a venture analyst scoring founder fit from a pitch-call \
transcript. Assess conviction, clarity, passion, and coachability, each in one or two \
sentences grounded in what the founder said. Note any pedigree the founder claims (schools, \
prior employers) without judging its truth, and whether they present as a repeat founder. \
Return verdict PASS if this reads as a fundable founder, FAIL otherwise, with a short \
reasoning. Return only a JSON object."
            .into(),
        schema: json!({
            "type": "object",
            "properties": {
                "conviction": {"type": "string"},
                "clarity": {"type": "string"},
                "passion": {"type": "string"},
                "coachability": {"type": "string"},
                "pedigree": {"type": ["string", "null"]},
                "repeat_founder": {"type": "boolean"},
                "verdict": {"enum": ["PASS", "FAIL"]},
                "reasoning": {"type": "string"}
            },
            "required": ["conviction", "clarity", "passion", "coachability", "verdict", "reasoning"]
        }),
    }
}

fn strategic() -> AnalysisProfile {
    AnalysisProfile {
        name: "strategic",
        instructions: "You are a venture analyst assessing strategic fit from a pitch-call \
transcript. Evaluate the soundness of the business model, the originality of the market \
position, and the overall strength of the pitch, each in one or two sentences. Return \
verdict PASS if the strategy holds together, FAIL otherwise, with a short reasoning. Return \
only a JSON object."
            .into(),
        schema: json!({
            "type": "object",
            "properties": {
                "business_model": {"type": "string"},
                "market_originality": {"type": "string"},
                "pitch_strength": {"type": "string"},
                "verdict": {"enum": ["PASS", "FAIL"]},
                "reasoning": {"type": "string"}
            },
            "required": ["business_model", "market_originality", "pitch_strength", "verdict", "reasoning"]
        }),
    }
}

fn claim_extraction() -> AnalysisProfile {
    AnalysisProfile {
        name: "claim_extraction",
        instructions: "Extract the verifiable biographical and organizational claims a \
founder makes in this pitch-call transcript: degrees from named schools, employment at named \
companies, and named credentials or titles. For each claim give the subject (the person or \
company the claim is about), the kind (education, employment, or credential), the entity \
named, and the supporting quote. Only include claims an outside search could check; opinions \
and product claims are not verifiable claims. If there are none, return an empty list. \
Return only a JSON object of the form {\"claims\": [...]}."
            .into(),
        schema: json!({
            "type": "object",
            "properties": {
                "claims": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "subject": {"type": "string"},
                            "kind": {"enum": ["education", "employment", "credential"]},
                            "entity": {"type": "string"},
                            "quote": {"type": "string"}
                        },
                        "required": ["subject", "kind", "entity"]
                    }
                }
            },
            "required": ["claims"]
        }),
    }
}

fn evidence_assessment() -> AnalysisProfile {
    AnalysisProfile {
        name: "evidence_assessment",
        instructions: "You are fact-checking a founder's claims against web-search evidence. \
The input is a JSON list of claims, each with the search results retrieved for it. Judge \
whether the evidence is consistent with each claim: three or more independent, consistent \
sources support high or very_high confidence; sources that contradict a claim mean the claim \
is not verified. Return verified true only if no checked claim is contradicted, a confidence \
level for your judgement, a details string summarizing the evidence, verdict PASS if the \
claims hold up or FAIL if any is contradicted, and a short reasoning. Return only a JSON \
object."
            .into(),
        schema: json!({
            "type": "object",
            "properties": {
                "verified": {"type": "boolean"},
                "confidence": {"enum": ["very_low", "low", "medium", "high", "very_high"]},
                "details": {"type": "string"},
                "verdict": {"enum": ["PASS", "FAIL"]},
                "reasoning": {"type": "string"}
            },
            "required": ["verified", "confidence", "details", "verdict", "reasoning"]
        }),
    }
}
