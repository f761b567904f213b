//! Immutable tuning tables for the classifier.
//!
//! Everything the extraction and scoring heuristics key off lives here, so
//! tests can swap individual tables without touching global state. Pattern
//! lists are ordered: the first pattern that matches wins, and reordering
//! them is a behavior change.

use chrono::Datelike;

/// Category weights for the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub contact_completeness: f64,
    pub experience_years: f64,
    pub skills_relevance: f64,
    pub education_level: f64,
    pub language_skills: f64,
    pub certifications: f64,
    pub text_quality: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            contact_completeness: 0.15,
            experience_years: 0.20,
            skills_relevance: 0.25,
            education_level: 0.15,
            language_skills: 0.10,
            certifications: 0.10,
            text_quality: 0.05,
        }
    }
}

/// Bonus keywords applied to a catalog entry whose own name contains one of
/// the trigger substrings. Each keyword occurrence adds 1 to the entry score.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub triggers: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub weights: ScoringWeights,

    // contact ladders, evaluated in order with early exit
    pub phone_patterns: &'static [&'static str],
    pub portfolio_patterns: &'static [&'static str],
    pub portfolio_excludes: &'static [&'static str],

    // name extraction
    pub name_denylist: &'static [&'static str],

    // years of experience
    pub experience_patterns: &'static [&'static str],
    pub student_keywords: &'static [&'static str],
    pub min_history_year: i32,
    pub current_year: i32,

    // seniority, checked senior -> semi-senior -> junior
    pub senior_patterns: &'static [&'static str],
    pub semi_senior_patterns: &'static [&'static str],
    pub junior_patterns: &'static [&'static str],
    pub senior_min_years: u32,
    pub semi_senior_min_years: u32,

    // industry / role keyword bonuses
    pub industry_keyword_groups: &'static [KeywordGroup],
    pub role_keyword_groups: &'static [KeywordGroup],

    // language synonym table; any variant hit counts for the entry
    pub language_synonyms: &'static [&'static [&'static str]],

    // scoring tables
    pub high_demand_skills: &'static [&'static str],
    pub education_ranks: &'static [(&'static str, f64)],
    pub education_default: f64,
    pub cert_keywords: &'static [&'static str],
    pub section_keywords: &'static [&'static str],
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            weights: ScoringWeights::default(),
            phone_patterns: &[
                // Paraguay first, then generic international
                r"\+?595[\s\-]?\d{9}",
                r"\+?\d{1,4}[\s\-]?\(?\d{1,4}\)?[\s\-]?\d{1,4}[\s\-]?\d{1,9}",
                r"\(\d{3}\)\s?\d{3}-?\d{4}",
                r"\d{3}[\s\-]?\d{3}[\s\-]?\d{3,4}",
                r"09\d{2}[\s\-]?\d{3}[\s\-]?\d{3}",
            ],
            portfolio_patterns: &[
                r"(?i)(?:https?://)?(?:www\.)?[a-zA-Z0-9\-]+\.(?:com|net|org|io|dev|py)/?[^\s]*",
                r"(?i)(?:portfolio|portafolio|website|sitio web):\s*(https?://[^\s]+)",
            ],
            portfolio_excludes: &["linkedin", "github", "gmail"],
            name_denylist: &[
                "cv", "curriculum", "resume", "telefono", "phone", "email", "github",
                "experiencia", "experience", "formacion", "educacion", "education",
                "habilidades", "skills", "idiomas", "languages", "contacto", "contact",
                "perfil", "profile", "estudiante", "student",
            ],
            experience_patterns: &[
                r"(\d+)\s*(?:años?|anhos?|years?)\s*(?:de\s*)?(?:experiencia|experience)",
                r"(?:experiencia|experience)\s*(?:de\s*)?(\d+)\s*(?:años?|anhos?|years?)",
                r"(\d+)\+?\s*(?:años?|anhos?|years?)\s*(?:en|in|of)",
                r"mas de (\d+)\s*(?:años?|anhos?)",
                r"over (\d+)\s*years?",
            ],
            student_keywords: &["estudiante", "student", "cursando", "semestre"],
            min_history_year: 1990,
            current_year: chrono::Utc::now().year(),
            senior_patterns: &[
                "senior", r"sr\.", "principal", "lead", "tech lead", "arquitecto", "experto",
            ],
            semi_senior_patterns: &[
                r"semi.?senior", "ssr", "intermedio", r"mid.?level", r"semi.?experimentado",
            ],
            junior_patterns: &[
                "junior", r"jr\.", "trainee", "practicante", "recien graduado",
                r"entry.?level", "estudiante", "pasante",
            ],
            senior_min_years: 5,
            semi_senior_min_years: 2,
            industry_keyword_groups: &[
                KeywordGroup {
                    triggers: &["tecnologia", "software", "it", "informatica"],
                    keywords: &[
                        "desarrollo", "programacion", "software", "web", "app", "sistema",
                        "tecnologia", "informatica", "programador", "developer", "python",
                        "java", "javascript", "php", "html", "css", "react", "angular",
                    ],
                },
                KeywordGroup {
                    triggers: &["salud", "medicina", "healthcare", "health"],
                    keywords: &[
                        "salud", "medicina", "hospital", "clinica", "medico", "enfermeria",
                    ],
                },
                KeywordGroup {
                    triggers: &["educacion", "education"],
                    keywords: &[
                        "educacion", "universidad", "colegio", "profesor", "maestro", "docente",
                    ],
                },
            ],
            role_keyword_groups: &[
                KeywordGroup {
                    triggers: &["desarrollador", "developer", "programador"],
                    keywords: &[
                        "programacion", "codigo", "desarrollo", "framework", "api",
                        "base de datos", "frontend", "backend", "fullstack", "web",
                    ],
                },
                KeywordGroup {
                    triggers: &["analista", "analyst"],
                    keywords: &["analisis", "datos", "reportes", "metricas", "dashboard"],
                },
                KeywordGroup {
                    triggers: &["tecnico", "soporte", "support"],
                    keywords: &["soporte", "mantenimiento", "reparacion", "instalacion"],
                },
            ],
            language_synonyms: &[
                &["espanol", "spanish", "castellano"],
                &["ingles", "english"],
                &["guarani"],
                &["portugues", "portuguese"],
                &["frances", "french", "francais"],
                &["aleman", "german", "deutsch"],
            ],
            high_demand_skills: &[
                "python", "javascript", "react", "aws", "docker", "kubernetes",
                "machine learning", "data science", "sql", "postgresql", "java",
                "php", "html", "css", "angular", "node.js", "springboot",
            ],
            education_ranks: &[
                ("doctorado", 100.0),
                ("phd", 100.0),
                ("doctor", 100.0),
                ("maestria", 85.0),
                ("master", 85.0),
                ("mba", 85.0),
                ("magister", 85.0),
                ("licenciatura", 70.0),
                ("ingenieria", 70.0),
                ("bachelor", 70.0),
                ("ingeniero", 70.0),
                ("tecnico", 50.0),
                ("tecnologico", 50.0),
                ("bachiller", 45.0),
                ("secundaria", 20.0),
                ("bachillerato", 20.0),
            ],
            education_default: 30.0,
            cert_keywords: &[
                "certificacion", "certification", "certified", "diplomado",
                "curso", "bootcamp", "nanodegree", "pasantia", "internship",
            ],
            section_keywords: &[
                "experiencia", "educacion", "habilidades", "experience", "education",
                "skills", "formacion", "idiomas", "contacto", "perfil",
            ],
        }
    }
}
