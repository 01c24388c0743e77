//! Static vocabularies used by the extractors and scorers.
//!
//! Everything here is a `const` table: read-only, shared by every analysis.

/// Technology lexicon grouped by category. Terms are lowercase.
pub const TECH_STACK: &[(&str, &[&str])] = &[
    (
        "languages",
        &[
            "python",
            "java",
            "javascript",
            "typescript",
            "sql",
            "scala",
            "r",
            "c++",
            "c#",
            "go",
            "rust",
            "kotlin",
        ],
    ),
    (
        "databases",
        &[
            "mysql",
            "postgresql",
            "mongodb",
            "cassandra",
            "dynamodb",
            "redis",
            "elasticsearch",
            "oracle",
            "sql server",
        ],
    ),
    (
        "cloud",
        &[
            "aws",
            "azure",
            "gcp",
            "google cloud",
            "terraform",
            "cloudformation",
        ],
    ),
    (
        "bigdata",
        &[
            "spark",
            "hadoop",
            "hive",
            "kafka",
            "flink",
            "airflow",
            "dbt",
            "talend",
            "informatica",
        ],
    ),
    (
        "ml",
        &[
            "tensorflow",
            "pytorch",
            "scikit-learn",
            "xgboost",
            "nlp",
            "neural network",
            "machine learning",
        ],
    ),
    (
        "tools",
        &[
            "git",
            "docker",
            "kubernetes",
            "jenkins",
            "gitlab",
            "github",
            "jira",
            "confluence",
        ],
    ),
];

/// Iterates every lexicon term in table order.
pub fn tech_terms() -> impl Iterator<Item = &'static str> {
    TECH_STACK.iter().flat_map(|(_, terms)| terms.iter().copied())
}

/// Number of terms across all lexicon categories.
pub fn tech_term_count() -> usize {
    TECH_STACK.iter().map(|(_, terms)| terms.len()).sum()
}

/// Lexicon terms that occur as substrings of already-lowercased text.
pub fn tech_terms_in(lowercase_text: &str) -> Vec<&'static str> {
    tech_terms()
        .filter(|term| lowercase_text.contains(term))
        .collect()
}

pub const MUST_HAVE_MARKERS: &[&str] = &[
    "must have",
    "required",
    "requirement",
    "minimum",
    "need ",
    "experience with",
    "expertise in",
];

pub const NICE_TO_HAVE_MARKERS: &[&str] = &[
    "preferred",
    "plus",
    "bonus",
    "nice to have",
    "additional",
    "beneficial",
];

pub const ROLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "manager",
    "architect",
    "specialist",
    "lead",
    "senior",
];

/// Title words that make a resume role count as adjacent to most targets.
pub const ADJACENT_ROLE_KEYWORDS: &[&str] = &["engineer", "developer", "analyst", "lead"];

/// Qualifiers that soften a skill claim.
pub const WEAK_QUALIFIERS: &[&str] = &["familiar with", "knowledge of", "basic", "some experience"];

pub const EXPERIENCE_HEADERS: &[&str] = &["professional experience", "work history", "experience"];

pub const EDUCATION_HEADERS: &[&str] = &["education", "qualifications"];
