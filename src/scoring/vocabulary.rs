//! Skill vocabulary matched by the scorer.

use std::collections::HashSet;

/// Terms recognised out of the box: technologies, platforms and soft skills.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Machine Learning",
    "Natural Language Processing",
    "Big Data Handling",
    "AI",
    "Software Engineering",
    "Python",
    "Java",
    "C++",
    "JavaScript",
    "SQL",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Django",
    "Flask",
    "React",
    "Angular",
    "Vue.js",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "Spring",
    "ASP.NET",
    "Git",
    "Docker",
    "Kubernetes",
    "Jenkins",
    "AWS",
    "Azure",
    "Google Cloud",
    "Hadoop",
    "Spark",
    "Terraform",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "SQLite",
    "Oracle",
    "Microsoft SQL Server",
    "Data Analysis",
    "Deep Learning",
    "Data Visualization",
    "Cybersecurity",
    "Cloud Computing",
    "DevOps",
    "Blockchain",
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Leadership",
    "Time Management",
    "Adaptability",
    "Critical Thinking",
    "Creativity",
    "Interpersonal Skills",
    "Project Management",
];

/// Ordered, case-insensitively deduplicated set of skill terms.
///
/// The first spelling of a term wins and is the one reported as evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self { terms: Vec::new() };
        vocabulary.extend(terms);
        vocabulary
    }

    /// Append terms, skipping blanks and case-insensitive duplicates.
    pub fn extend<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = self.terms.iter().map(|t| t.to_lowercase()).collect();
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            if seen.insert(term.to_lowercase()) {
                self.terms.push(term.to_string());
            }
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_has_every_term_once() {
        let vocabulary = SkillVocabulary::default();
        assert_eq!(vocabulary.len(), DEFAULT_SKILLS.len());
        assert!(vocabulary.terms().iter().any(|t| t == "Python"));
        assert!(vocabulary.terms().iter().any(|t| t == "Microsoft SQL Server"));
    }

    #[test]
    fn extend_skips_blank_and_duplicate_terms() {
        let mut vocabulary = SkillVocabulary::new(["Rust", "Go"]);
        vocabulary.extend(["rust", "  ", "Zig", "GO"]);
        assert_eq!(vocabulary.terms(), ["Rust", "Go", "Zig"]);
    }

    #[test]
    fn terms_are_trimmed() {
        let vocabulary = SkillVocabulary::new(["  Elixir "]);
        assert_eq!(vocabulary.terms(), ["Elixir"]);
    }
}
