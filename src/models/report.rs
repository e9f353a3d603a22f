use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::rubric::MetricCategory;

/// Which aggregation formula produced a report's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Mean of section coverage, readability, sentiment and financial presence.
    Basic,
    /// Weighted blend of section coverage, readability, sentiment and structure.
    Structural,
}

impl ScoringPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::Basic => "basic",
            ScoringPolicy::Structural => "structural",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// Lower bound of each band, best band first. Bounds are inclusive.
    const BANDS: [(f64, Grade); 9] = [
        (90.0, Grade::APlus),
        (85.0, Grade::A),
        (80.0, Grade::AMinus),
        (75.0, Grade::BPlus),
        (70.0, Grade::B),
        (65.0, Grade::BMinus),
        (60.0, Grade::CPlus),
        (55.0, Grade::C),
        (50.0, Grade::CMinus),
    ];

    pub fn from_score(score: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::D)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    pub fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

impl Default for SentimentScores {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StructureScores {
    pub clarity: f64,
    pub flow: f64,
    pub completeness: f64,
    pub engagement: f64,
}

impl StructureScores {
    pub fn average(&self) -> f64 {
        (self.clarity + self.flow + self.completeness + self.engagement) / 4.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionFlag {
    pub name: String,
    pub present: u8,
}

/// Binary found/not-found flag per rubric section, in rubric order.
///
/// Serializes as a `{"<section name>": 0 | 1}` map whose keys keep rubric
/// order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionScoreRecord(Vec<SectionFlag>);

impl SectionScoreRecord {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>, found: bool) {
        self.0.push(SectionFlag {
            name: name.into(),
            present: u8::from(found),
        });
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.0.iter().find(|f| f.name == name).map(|f| f.present)
    }

    pub fn found_count(&self) -> usize {
        self.0.iter().filter(|f| f.present == 1).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionFlag> {
        self.0.iter()
    }
}

impl Serialize for SectionScoreRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for flag in &self.0 {
            map.serialize_entry(&flag.name, &flag.present)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SectionScoreRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = SectionScoreRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of section names to 0 or 1")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = SectionScoreRecord::new();
                while let Some((name, present)) = access.next_entry::<String, u8>()? {
                    if present > 1 {
                        return Err(de::Error::custom(format!(
                            "flag for section '{}' must be 0 or 1, got {}",
                            name, present
                        )));
                    }
                    record.push(name, present == 1);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Matched snippets per metric category. Every category is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialMetrics(BTreeMap<MetricCategory, Vec<String>>);

impl FinancialMetrics {
    pub fn empty() -> Self {
        Self(
            MetricCategory::ALL
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
        )
    }

    pub fn set(&mut self, category: MetricCategory, snippets: Vec<String>) {
        self.0.insert(category, snippets);
    }

    pub fn get(&self, category: MetricCategory) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn any_found(&self) -> bool {
        self.0.values().any(|v| !v.is_empty())
    }

    /// Categories with their snippets, in `MetricCategory::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricCategory, &[String])> {
        self.0.iter().map(|(category, snippets)| (*category, snippets.as_slice()))
    }
}

impl Default for FinancialMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketOpportunity {
    pub size_mentioned: bool,
    pub tam_sam_som: bool,
    pub market_size_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub section_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub tips: Vec<String>,
    pub section_scores: SectionScoreRecord,
    pub readability: f64,
    pub sentiment: SentimentScores,
    pub keywords: Vec<String>,
    pub financial_metrics: FinancialMetrics,
    pub structure: StructureScores,
    pub competitive_advantages: Vec<String>,
    pub market_opportunity: MarketOpportunity,
    pub policy: ScoringPolicy,
    pub overall_score: f64,
    pub grade: Grade,
    pub recommendations: Vec<String>,
}
