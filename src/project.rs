use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier for every phase whose duration can be overridden or which can
/// be skipped from a project configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Negotiation,
    Urbanism,
    Tender,
    LeaseManagement,
    Connection,
    Construction,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Negotiation,
        Phase::Urbanism,
        Phase::Tender,
        Phase::LeaseManagement,
        Phase::Connection,
        Phase::Construction,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Phase::Negotiation => "negotiation",
            Phase::Urbanism => "urbanism",
            Phase::Tender => "tender",
            Phase::LeaseManagement => "lease_management",
            Phase::Connection => "connection",
            Phase::Construction => "construction",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Phase::ALL.into_iter().find(|phase| phase.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Negotiation => "Negotiation",
            Phase::Urbanism => "Urbanism permitting",
            Phase::Tender => "Tender (AO CRE)",
            Phase::LeaseManagement => "Lease management",
            Phase::Connection => "Grid connection",
            Phase::Construction => "Construction",
        }
    }
}

/// Mounting typology of the generation asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typology {
    NewRoof,
    ExistingRoof,
    ShadedStructure,
    GroundMounted,
}

impl Typology {
    pub fn key(&self) -> &'static str {
        match self {
            Typology::NewRoof => "new_roof",
            Typology::ExistingRoof => "existing_roof",
            Typology::ShadedStructure => "shaded_structure",
            Typology::GroundMounted => "ground_mounted",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "new_roof" => Some(Typology::NewRoof),
            "existing_roof" => Some(Typology::ExistingRoof),
            "shaded_structure" => Some(Typology::ShadedStructure),
            "ground_mounted" => Some(Typology::GroundMounted),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Typology::NewRoof => "New roof",
            Typology::ExistingRoof => "Existing roof",
            Typology::ShadedStructure => "Shaded structure",
            Typology::GroundMounted => "Ground mounted",
        }
    }
}

/// How the produced energy is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionMode {
    TotalInjection,
    SelfConsumption,
}

impl InjectionMode {
    pub fn key(&self) -> &'static str {
        match self {
            InjectionMode::TotalInjection => "total_injection",
            InjectionMode::SelfConsumption => "self_consumption",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "total_injection" => Some(InjectionMode::TotalInjection),
            "self_consumption" => Some(InjectionMode::SelfConsumption),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InjectionMode::TotalInjection => "Total injection",
            InjectionMode::SelfConsumption => "Self-consumption",
        }
    }
}

/// Who finances the asset. The lease-management phase is gated on the
/// `OwnInvestment` variant as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentModel {
    OwnInvestment,
    ThirdPartyInvestment,
}

impl InvestmentModel {
    pub fn key(&self) -> &'static str {
        match self {
            InvestmentModel::OwnInvestment => "own_investment",
            InvestmentModel::ThirdPartyInvestment => "third_party_investment",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "own_investment" => Some(InvestmentModel::OwnInvestment),
            "third_party_investment" => Some(InvestmentModel::ThirdPartyInvestment),
            _ => None,
        }
    }

    /// Historical display labels. They read as the opposite of the variant
    /// identifiers; a suspected naming defect kept for parity with existing
    /// data and displays. The identifier, not the label, drives gating.
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentModel::OwnInvestment => "Third-party investor",
            InvestmentModel::ThirdPartyInvestment => "Own investment",
        }
    }
}

/// Immutable input to the timeline engine. `signature_date` is T0, the
/// anchor for every derived date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
    pub name: String,
    pub signature_date: NaiveDate,
    pub power_kwc: f64,
    pub typology: Typology,
    pub injection: InjectionMode,
    pub investment: InvestmentModel,
    pub subcontracted: bool,
    /// Requested phase durations in months, overriding the rule-derived
    /// defaults. Sparse: absent phases use the defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub duration_overrides: BTreeMap<Phase, f64>,
    /// Phases excluded from the plan. Sparse: absent phases run.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub skipped_phases: BTreeSet<Phase>,
}

impl ProjectConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        signature_date: NaiveDate,
        power_kwc: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            signature_date,
            power_kwc,
            typology: Typology::ExistingRoof,
            injection: InjectionMode::TotalInjection,
            investment: InvestmentModel::OwnInvestment,
            subcontracted: false,
            duration_overrides: BTreeMap::new(),
            skipped_phases: BTreeSet::new(),
        }
    }

    pub fn duration_override(&self, phase: Phase) -> Option<f64> {
        self.duration_overrides.get(&phase).copied()
    }

    pub fn is_skipped(&self, phase: Phase) -> bool {
        self.skipped_phases.contains(&phase)
    }

    pub fn set_duration_override(&mut self, phase: Phase, months: f64) {
        self.duration_overrides.insert(phase, months);
    }

    pub fn clear_duration_override(&mut self, phase: Phase) {
        self.duration_overrides.remove(&phase);
    }

    pub fn set_skipped(&mut self, phase: Phase, skipped: bool) {
        if skipped {
            self.skipped_phases.insert(phase);
        } else {
            self.skipped_phases.remove(&phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_keys_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_key(phase.key()), Some(phase));
        }
        assert_eq!(Phase::from_key("unknown"), None);
    }

    #[test]
    fn skip_and_override_helpers() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut config = ProjectConfig::new("p1", "Demo", date, 200.0);
        assert!(!config.is_skipped(Phase::Urbanism));
        config.set_skipped(Phase::Urbanism, true);
        assert!(config.is_skipped(Phase::Urbanism));
        config.set_skipped(Phase::Urbanism, false);
        assert!(!config.is_skipped(Phase::Urbanism));

        assert_eq!(config.duration_override(Phase::Tender), None);
        config.set_duration_override(Phase::Tender, 2.5);
        assert_eq!(config.duration_override(Phase::Tender), Some(2.5));
        config.clear_duration_override(Phase::Tender);
        assert_eq!(config.duration_override(Phase::Tender), None);
    }
}
