#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalCategory {
    Emergency,
    Travel,
    Home,
    Car,
    Debt,
    Retirement,
    Education,
    Wedding,
    General,
    Other,
}

/// Display attributes for a category. Carries no logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

// Indexed by `GoalCategory as usize`; keep in declaration order.
static STYLES: [CategoryStyle; 10] = [
    CategoryStyle { label: "Emergency Fund", icon: "🛡", color: "blue" },
    CategoryStyle { label: "Travel", icon: "✈", color: "purple" },
    CategoryStyle { label: "Home Purchase", icon: "⌂", color: "green" },
    CategoryStyle { label: "Car", icon: "🚗", color: "red" },
    CategoryStyle { label: "Pay Off Debt", icon: "💳", color: "orange" },
    CategoryStyle { label: "Retirement", icon: "📈", color: "indigo" },
    CategoryStyle { label: "Education", icon: "🎓", color: "cyan" },
    CategoryStyle { label: "Wedding", icon: "♥", color: "pink" },
    CategoryStyle { label: "General Savings", icon: "💵", color: "teal" },
    CategoryStyle { label: "Other", icon: "★", color: "gray" },
];

impl GoalCategory {
    /// Stable identifier used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Travel => "travel",
            Self::Home => "home",
            Self::Car => "car",
            Self::Debt => "debt",
            Self::Retirement => "retirement",
            Self::Education => "education",
            Self::Wedding => "wedding",
            Self::General => "general",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "emergency" | "emergency fund" => Self::Emergency,
            "travel" => Self::Travel,
            "home" | "home purchase" => Self::Home,
            "car" => Self::Car,
            "debt" | "pay off debt" => Self::Debt,
            "retirement" => Self::Retirement,
            "education" => Self::Education,
            "wedding" => Self::Wedding,
            "general" | "general savings" => Self::General,
            _ => Self::Other,
        }
    }

    pub fn all() -> &'static [GoalCategory] {
        &[
            Self::Emergency,
            Self::Travel,
            Self::Home,
            Self::Car,
            Self::Debt,
            Self::Retirement,
            Self::Education,
            Self::Wedding,
            Self::General,
            Self::Other,
        ]
    }

    pub fn style(&self) -> &'static CategoryStyle {
        &STYLES[*self as usize]
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.style().label)
    }
}
