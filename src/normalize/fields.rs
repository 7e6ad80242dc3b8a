use crate::source::StatementKind;

/// One canonical field and the upstream labels that may carry it, in preference order.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

/// The canonical fields extracted from one kind of statement.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub kind: StatementKind,
    pub fields: &'static [FieldSpec],
}

impl FieldMap {
    /// The built-in map for a statement kind.
    pub const fn for_kind(kind: StatementKind) -> &'static FieldMap {
        match kind {
            StatementKind::Income => &INCOME_FIELDS,
            StatementKind::Balance => &BALANCE_FIELDS,
            StatementKind::CashFlow => &CASH_FLOW_FIELDS,
        }
    }

    /// Canonical field names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }
}

// Labels cover both the spaced display names and Yahoo's timeseries keys.

pub const INCOME_FIELDS: FieldMap = FieldMap {
    kind: StatementKind::Income,
    fields: &[
        FieldSpec {
            name: "total_revenue",
            labels: &["Total Revenue", "TotalRevenue"],
        },
        FieldSpec {
            name: "gross_profit",
            labels: &["Gross Profit", "GrossProfit"],
        },
        FieldSpec {
            name: "operating_income",
            labels: &["Operating Income", "OperatingIncome"],
        },
        FieldSpec {
            name: "net_income",
            labels: &[
                "Net Income",
                "NetIncome",
                "Net Income Common Stockholders",
                "NetIncomeCommonStockholders",
            ],
        },
        FieldSpec {
            name: "ebitda",
            labels: &["EBITDA", "Normalized EBITDA", "NormalizedEBITDA"],
        },
    ],
};

pub const BALANCE_FIELDS: FieldMap = FieldMap {
    kind: StatementKind::Balance,
    fields: &[
        FieldSpec {
            name: "total_assets",
            labels: &["Total Assets", "TotalAssets"],
        },
        FieldSpec {
            name: "total_liabilities",
            labels: &[
                "Total Liabilities",
                "Total Liabilities Net Minority Interest",
                "TotalLiabilitiesNetMinorityInterest",
            ],
        },
        FieldSpec {
            name: "total_equity",
            labels: &[
                "Total Equity",
                "Stockholders Equity",
                "StockholdersEquity",
                "Total Equity Gross Minority Interest",
                "TotalEquityGrossMinorityInterest",
            ],
        },
        FieldSpec {
            name: "cash_and_equivalents",
            labels: &[
                "Cash and Cash Equivalents",
                "Cash And Cash Equivalents",
                "CashAndCashEquivalents",
            ],
        },
        FieldSpec {
            name: "total_debt",
            labels: &["Total Debt", "TotalDebt"],
        },
    ],
};

pub const CASH_FLOW_FIELDS: FieldMap = FieldMap {
    kind: StatementKind::CashFlow,
    fields: &[
        FieldSpec {
            name: "operating_cash_flow",
            labels: &["Operating Cash Flow", "OperatingCashFlow"],
        },
        FieldSpec {
            name: "investing_cash_flow",
            labels: &["Investing Cash Flow", "InvestingCashFlow"],
        },
        FieldSpec {
            name: "financing_cash_flow",
            labels: &["Financing Cash Flow", "FinancingCashFlow"],
        },
        FieldSpec {
            name: "free_cash_flow",
            labels: &["Free Cash Flow", "FreeCashFlow"],
        },
    ],
};
