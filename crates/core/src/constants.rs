/// Document key of the bank accounts category
pub const CATEGORY_BANK: &str = "Bank";

/// Document key of the robo-advisor platforms category
pub const CATEGORY_ROBOS: &str = "Robos";

/// Document key of the brokerage investments category
pub const CATEGORY_INVESTMENTS: &str = "Investments";

/// Document key of the retirement funds category
pub const CATEGORY_CPF: &str = "CPF";

/// Document key of the crypto category
pub const CATEGORY_CRYPTO: &str = "Crypto";

/// Document key of the other assets category
pub const CATEGORY_OTHERS: &str = "Others";

/// Built-in robo-advisor platform identifiers
pub const PLATFORM_SYFE: &str = "Syfe";
pub const PLATFORM_ENDOWUS: &str = "Endowus";

/// Standard product categories offered by Syfe
pub const SYFE_STANDARD_CATEGORIES: [&str; 6] = [
    "cashManagement",
    "core",
    "downsideProtected",
    "incomePlus",
    "reit",
    "thematic",
];

/// Standard product categories offered by Endowus
pub const ENDOWUS_STANDARD_CATEGORIES: [&str; 4] =
    ["cashSmart", "coreFlagship", "incomeFund", "satellite"];

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
