//! Built-in question banks.

use super::question::{Question, QuestionId};
use super::source::{QuestionSource, SourceError};
use tracing::instrument;

type Entry = (u64, &'static str, [&'static str; 4], usize);

/// A named, bundled question bank.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    name: &'static str,
    entries: &'static [Entry],
}

impl Theme {
    /// Theme name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of questions in the bank.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a bank without questions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the bank's questions.
    pub fn questions(&self) -> Vec<Question> {
        self.entries
            .iter()
            .filter_map(|(id, content, options, correct)| {
                Question::new(
                    QuestionId(*id),
                    *content,
                    options.map(str::to_string),
                    *correct,
                )
                .ok()
            })
            .collect()
    }
}

impl QuestionSource for Theme {
    fn label(&self) -> String {
        self.name.to_string()
    }

    fn load(&self) -> Result<Vec<Question>, SourceError> {
        Ok(self.questions())
    }
}

const MATHEMATICS: &[Entry] = &[
    (1, "Compute: $ \\frac{1}{2} + \\frac{1}{4} $", ["$ \\frac{3}{4} $", "$ \\frac{2}{6} $", "$ \\frac{1}{3} $", "$ \\frac{2}{4} $"], 0),
    (2, "Find x: $ x : 5 = 12 $", ["x = 60", "x = 17", "x = 7", "x = 2.4"], 0),
    (3, "Area of a square with side $ a = 5cm $?", ["$ 20cm^2 $", "$ 25cm^2 $", "$ 10cm^2 $", "$ 15cm^2 $"], 1),
    (4, "Which is the smallest prime number?", ["0", "1", "2", "3"], 2),
    (5, "Compute: $ 2^3 + 3^2 $", ["12", "15", "17", "18"], 2),
    (6, "Which fraction is largest?", ["$ \\frac{1}{2} $", "$ \\frac{2}{3} $", "$ \\frac{3}{4} $", "$ \\frac{4}{5} $"], 3),
    (7, "What is $ \\pi $ approximately?", ["3.12", "3.14", "3.16", "3.18"], 1),
    (8, "Square root of 144?", ["10", "11", "12", "14"], 2),
    (9, "How many altitudes does a triangle have?", ["1", "2", "3", "4"], 2),
    (10, "Solve: $ 2x - 4 = 0 $", ["x = 1", "x = 2", "x = 4", "x = -2"], 1),
    (11, "The proportion $ a:b = c:d $ is equivalent to?", ["$ ad = bc $", "$ ab = cd $", "$ ac = bd $", "$ a+d = b+c $"], 0),
    (12, "Reciprocal of $ \\frac{3}{5} $?", ["$ -\\frac{3}{5} $", "$ \\frac{5}{3} $", "$ 1 $", "$ 0 $"], 1),
];

const SCIENCE: &[Entry] = &[
    (101, "Which planet is closest to the Sun?", ["Venus", "Mercury", "Mars", "Earth"], 1),
    (102, "Boiling point of pure water at sea level?", ["90°C", "100°C", "110°C", "120°C"], 1),
    (103, "Which gas makes up most of the air?", ["Oxygen", "Nitrogen", "Carbon dioxide", "Argon"], 1),
    (104, "Who formulated the law of universal gravitation?", ["Einstein", "Newton", "Galileo", "Edison"], 1),
    (105, "Which organ filters the blood?", ["Heart", "Lungs", "Liver", "Kidneys"], 3),
    (106, "How many basic states of matter are taught in school?", ["2", "3", "4", "5"], 1),
    (107, "How long does sunlight take to reach Earth?", ["8 seconds", "8 minutes", "8 hours", "8 days"], 1),
    (108, "Chemical formula of table salt?", ["NaCl", "H2O", "HCl", "NaOH"], 0),
    (109, "Unit of electric current?", ["Volt", "Watt", "Ampere", "Ohm"], 2),
    (110, "Which is a fossil fuel?", ["Wind", "Sunlight", "Coal", "Waves"], 2),
    (111, "What makes human blood red?", ["Iron", "Copper", "Zinc", "Hemoglobin"], 3),
    (112, "Where does the Archimedes buoyant force act?", ["Liquids", "Solids", "Vacuum", "Everywhere"], 0),
];

/// The bundled themes.
pub fn builtin_themes() -> [Theme; 2] {
    [
        Theme {
            name: "Mathematics",
            entries: MATHEMATICS,
        },
        Theme {
            name: "Natural Science",
            entries: SCIENCE,
        },
    ]
}

/// Looks up a bundled theme by name, ignoring case.
#[instrument]
pub fn find_theme(name: &str) -> Option<Theme> {
    builtin_themes()
        .into_iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
}
