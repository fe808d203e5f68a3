//! Static subscription plan catalog.
//!
//! Read-only reference data: plans are compiled in, never mutated at
//! runtime. A company references a plan by name; lookups that miss the
//! catalog are handled by the entitlement gate's fail-open policy, not here.

use rust_decimal::Decimal;
use std::sync::OnceLock;

/// Plan name assumed when a company has no plan set.
pub const DEFAULT_PLAN: &str = "Starter";

/// A subscription plan definition: pricing plus limits.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDefinition {
    pub name: &'static str,
    pub monthly_price: Decimal,
    pub yearly_price: Decimal,
    pub max_members: u32,
    pub max_leads: u32,
    pub messaging_automation: bool,
    pub ai_lead_search: bool,
    pub advanced_reporting: bool,
}

static CATALOG: OnceLock<Vec<PlanDefinition>> = OnceLock::new();

/// All catalog entries, in display order.
pub fn plan_catalog() -> &'static [PlanDefinition] {
    CATALOG.get_or_init(|| {
        vec![
            PlanDefinition {
                name: "Starter",
                monthly_price: Decimal::from(49),
                yearly_price: Decimal::from(490),
                max_members: 3,
                max_leads: 50,
                messaging_automation: false,
                ai_lead_search: false,
                advanced_reporting: false,
            },
            PlanDefinition {
                name: "Professional",
                monthly_price: Decimal::from(99),
                yearly_price: Decimal::from(990),
                max_members: 10,
                max_leads: 500,
                messaging_automation: true,
                ai_lead_search: false,
                advanced_reporting: true,
            },
            PlanDefinition {
                name: "Enterprise",
                monthly_price: Decimal::from(249),
                yearly_price: Decimal::from(2490),
                max_members: 50,
                max_leads: 5000,
                messaging_automation: true,
                ai_lead_search: true,
                advanced_reporting: true,
            },
        ]
    })
}

/// Look up a plan by name. Returns `None` for names with no catalog entry.
pub fn find_plan(name: &str) -> Option<&'static PlanDefinition> {
    plan_catalog().iter().find(|p| p.name == name)
}
