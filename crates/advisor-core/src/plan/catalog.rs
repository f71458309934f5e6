//! Static plan table.

use super::model::{Plan, Tier};

/// Daily message quota for the free tier.
pub const FREE_DAILY_LIMIT: u32 = 10;

static PLANS: [Plan; 3] = [
    Plan {
        tier: Tier::Free,
        name: "Free",
        monthly_price: "$0",
        yearly_price: "$0",
        daily_limit: Some(FREE_DAILY_LIMIT),
        features: &[
            "10 conversations per day",
            "Access to 5 expert advisors",
            "Basic AI responses",
            "Community support",
            "Standard response time",
            "Email support",
        ],
    },
    Plan {
        tier: Tier::Pro,
        name: "Pro",
        monthly_price: "$9.99",
        yearly_price: "$99",
        daily_limit: None,
        features: &[
            "Unlimited conversations",
            "Access to all expert advisors",
            "Advanced AI reasoning",
            "Multi-expert councils",
            "Priority response time",
            "Context memory (30 days)",
            "Export conversations",
            "Priority support",
            "No ads",
            "Early access to new features",
        ],
    },
    Plan {
        tier: Tier::Enterprise,
        name: "Enterprise",
        monthly_price: "Custom",
        yearly_price: "Custom",
        daily_limit: None,
        features: &[
            "Everything in Pro",
            "Custom AI models",
            "Team collaboration",
            "Admin dashboard",
            "SSO & SAML",
            "Dedicated account manager",
            "Custom integrations",
            "SLA guarantee",
            "Custom training",
            "API access",
            "Volume discounts",
            "White-label options",
        ],
    },
];

/// Returns every plan, cheapest first.
pub fn all_plans() -> &'static [Plan] {
    &PLANS
}

/// Returns the plan for a tier.
pub fn plan_for(tier: Tier) -> &'static Plan {
    match tier {
        Tier::Free => &PLANS[0],
        Tier::Pro => &PLANS[1],
        Tier::Enterprise => &PLANS[2],
    }
}
