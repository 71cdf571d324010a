//! Fixed questionnaire vocabulary.
//!
//! Two kinds of lookup tables live here. A [`Codebook`] maps the numeric
//! answers of one question to labels; codes outside the table get the
//! fallback label `Código {code}`. A [`ColumnGroup`] lists the yes/no
//! sub-questions of a multi-part question (one column each) with the label
//! of what that column asks about.
//!
//! Labels are the survey's own wording and stay in Spanish.

use std::borrow::Cow;

/// Answer codes of a single question.
#[derive(Debug, Clone, Copy)]
pub struct Codebook {
    pub column: &'static str,
    pub question: &'static str,
    entries: &'static [(i64, &'static str)],
    code_width: usize,
}

impl Codebook {
    pub const fn new(
        column: &'static str,
        question: &'static str,
        entries: &'static [(i64, &'static str)],
    ) -> Self {
        Self {
            column,
            question,
            entries,
            code_width: 1,
        }
    }

    /// Codes are displayed zero-padded to `width` digits.
    pub const fn with_code_width(mut self, width: usize) -> Self {
        self.code_width = width;
        self
    }

    pub fn get(&self, code: i64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.get(code).is_some()
    }

    /// Label for a code, falling back to `Código {code}` for unknown codes.
    pub fn label(&self, code: i64) -> Cow<'static, str> {
        match self.get(code) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(format!("Código {}", self.display_code(code))),
        }
    }

    pub fn display_code(&self, code: i64) -> String {
        format!("{:0width$}", code, width = self.code_width)
    }

    /// Known codes in questionnaire order.
    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn entries(&self) -> &'static [(i64, &'static str)] {
        self.entries
    }
}

/// The sub-question columns of a multi-part yes/no question.
#[derive(Debug, Clone, Copy)]
pub struct ColumnGroup {
    pub question: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnGroup {
    pub const fn new(
        question: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { question, entries }
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(column, _)| *column)
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    pub fn label(&self, column: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, label)| *label)
    }

    /// Compact column range for messages, e.g. `p20s1-p20s5`.
    pub fn span(&self) -> String {
        match (self.entries.first(), self.entries.last()) {
            (Some((first, _)), Some((last, _))) if first != last => format!("{}-{}", first, last),
            (Some((only, _)), _) => (*only).to_string(),
            _ => String::new(),
        }
    }
}

/// Yes/no answer codes used by every multi-part question.
pub const YES: i64 = 1;
pub const NO: i64 = 2;

pub const DEPARTMENT: Codebook = Codebook::new(
    "p1",
    "Departamento",
    &[
        (5, "Antioquia"),
        (8, "Atlántico"),
        (11, "Bogotá D.C."),
        (13, "Bolivar"),
        (15, "Boyacá"),
        (17, "Caldas"),
        (18, "Caquetá"),
        (19, "Cauca"),
        (20, "Cesar"),
        (23, "Córdoba"),
        (25, "Cundinamarca"),
        (27, "Chocó"),
        (41, "Huila"),
        (44, "La Guajira"),
        (47, "Magdalena"),
        (50, "Meta"),
        (52, "Nariño"),
        (54, "Norte de Santander"),
        (63, "Quindío"),
        (66, "Risaralda"),
        (68, "Santander"),
        (70, "Sucre"),
        (73, "Tolima"),
        (76, "Valle del Cauca"),
        (81, "Arauca"),
        (85, "Casanare"),
        (86, "Putumayo"),
        (88, "San Andrés"),
        (91, "Amazonas"),
        (94, "Guainía"),
        (95, "Guaviare"),
        (97, "Vaupés"),
        (99, "Vichada"),
    ],
)
.with_code_width(2);

pub const SEX: Codebook = Codebook::new("p9", "Sexo", &[(1, "Hombre"), (2, "Mujer")]);

pub const SLEEP_MUNICIPALITY: Codebook = Codebook::new(
    "p12",
    "¿En qué municipio duerme usted habitualmente?",
    &[
        (1, "En este municipio"),
        (2, "Otro municipio"),
        (3, "Otro país"),
    ],
);

/// Code 1 (open street) drives the SleepsOnStreet indicator.
pub const SLEEP_LOCATION: Codebook = Codebook::new(
    "p13",
    "¿Dónde duerme usted habitualmente?",
    &[(1, "Calle"), (2, "Dormitorio"), (3, "Institución")],
);

/// Shared by `p16s1` (hearing) and `p16s2` (speaking); codes below 4 mean
/// some degree of difficulty.
pub const SENSORY_CAPABILITY: [(i64, &str); 4] = [
    (1, "No puede hacerlo"),
    (2, "Mucha dificultad"),
    (3, "Con dificultad"),
    (4, "Sin esfuerzo"),
];

pub const HEARING: Codebook =
    Codebook::new("p16s1", "¿Puede oír la voz o los sonidos?", &SENSORY_CAPABILITY);

pub const SPEAKING: Codebook =
    Codebook::new("p16s2", "¿Puede hablar o conversar?", &SENSORY_CAPABILITY);

pub const STREET_REASON: Codebook = Codebook::new(
    "p22",
    "Razón principal para vivir en la calle",
    &[
        (1, "Consumo de sustancias psicoactivas"),
        (2, "Por gusto personal"),
        (3, "Amenaza o riesgo para su vida"),
        (4, "Influencia de otras personas"),
        (5, "Dificultades económicas"),
        (6, "Falta de trabajo"),
        (7, "Conflictos familiares"),
        (8, "Abuso sexual"),
        (9, "Siempre ha vivido en la calle"),
        (10, "Víctima del conflicto armado"),
        (11, "Otra"),
    ],
);

pub const HELP_SOURCE: Codebook = Codebook::new(
    "p26_1",
    "Principal fuente de ayuda",
    &[
        (1, "Familiar"),
        (2, "Amigos"),
        (3, "Instituciones oficiales"),
        (4, "Instituciones/organizaciones privadas"),
        (5, "Organizaciones religiosas"),
        (6, "Otros"),
    ],
);

pub const HEALTH_CONDITIONS: ColumnGroup = ColumnGroup::new(
    "Diagnóstico de enfermedades",
    &[
        ("p20s1", "Hipertensión"),
        ("p20s2", "Diabetes"),
        ("p20s3", "Cáncer"),
        ("p20s4", "Tuberculosis"),
        ("p20s5", "VIH-SIDA"),
    ],
);

pub const SENSORY_COLUMNS: ColumnGroup = ColumnGroup::new(
    "Capacidades sensoriales",
    &[("p16s1", "Oír"), ("p16s2", "Hablar")],
);

pub const SUBSTANCES_CURRENT: ColumnGroup = ColumnGroup::new(
    "Consumo actual de sustancias",
    &[
        ("p30s1", "Cigarrillo"),
        ("p30s2", "Alcohol"),
        ("p30s3", "Marihuana"),
        ("p30s4", "Inhalantes"),
        ("p30s5", "Cocaína"),
        ("p30s6", "Basuco"),
        ("p30s7", "Heroína"),
        ("p30s8", "Pepas"),
        ("p30s9", "Otras"),
    ],
);

pub const SECURITY_FACTORS: ColumnGroup = ColumnGroup::new(
    "Factores que afectan la seguridad",
    &[
        ("p33s1", "Persecución por integrantes de olla"),
        ("p33s2", "Ser forzado a cumplir tareas contra su voluntad"),
        ("p33s3", "Abuso policial"),
        ("p33s4", "Problemas con grupos juveniles (Barras Bravas, Calvos)"),
        ("p33s5", "Problemas con la comunidad"),
        ("p33s6", "Otra"),
    ],
);

pub const SLEEP_LOCATION_COLUMNS: ColumnGroup =
    ColumnGroup::new("Lugar donde duerme", &[("p13", "Lugar donde duerme")]);

pub const AGE_COLUMN: &str = "p8r";
pub const STREET_YEARS_COLUMN: &str = "p23s1r";
