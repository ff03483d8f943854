//! Canned directory entries, templated with the caller's location and crop.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{lenient_string, validate_required, ValidationErrors};

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Nashik")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Onion")]
    pub crop: Option<String>,
}

/// Which fields a directory endpoint insists on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Location,
    LocationAndCrop,
}

impl DirectoryRequest {
    pub fn check(&self, requirement: Requirement) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(self.location.as_deref(), "location", "Location", &mut errors);
        if requirement == Requirement::LocationAndCrop {
            validate_required(self.crop.as_deref(), "crop", "Crop", &mut errors);
        }
        errors.into_result()
    }

    fn location(&self) -> &str {
        self.location.as_deref().map(str::trim).unwrap_or_default()
    }

    fn crop(&self) -> &str {
        self.crop.as_deref().map(str::trim).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketVendor {
    pub name: String,
    pub market_type: String,
    pub address: String,
    pub contact: String,
    pub price_range: String,
    pub buying_days: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalMarketResponse {
    pub location: String,
    pub crop: String,
    pub vendors: Vec<MarketVendor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentOrganization {
    pub name: String,
    pub department: String,
    pub address: String,
    pub contact: String,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentOrganizationsResponse {
    pub location: String,
    pub organizations: Vec<GovernmentOrganization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanScheme {
    pub bank: String,
    pub scheme_name: String,
    pub interest_rate: String,
    pub max_amount: String,
    pub tenure: String,
    pub eligibility: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankLoansResponse {
    pub location: String,
    pub crop: String,
    pub schemes: Vec<LoanScheme>,
}

pub fn local_market(request: &DirectoryRequest) -> LocalMarketResponse {
    let (location, crop) = (request.location(), request.crop());
    LocalMarketResponse {
        location: location.to_string(),
        crop: crop.to_string(),
        vendors: vec![
            MarketVendor {
                name: format!("{} Agricultural Produce Market Committee", location),
                market_type: "Regulated mandi".to_string(),
                address: format!("APMC Yard, Market Road, {}", location),
                contact: "1800-270-0224".to_string(),
                price_range: format!("Daily auction price for {}", crop),
                buying_days: "Monday to Saturday".to_string(),
            },
            MarketVendor {
                name: format!("{} Farmers Producer Company", location),
                market_type: "Farmer producer organisation".to_string(),
                address: format!("Near Taluka Office, {}", location),
                contact: "+91 98765 43210".to_string(),
                price_range: format!("Contract rates for {} agreed before sowing", crop),
                buying_days: "Tuesday and Friday".to_string(),
            },
            MarketVendor {
                name: format!("{} Fresh Wholesale Traders", crop),
                market_type: "Private wholesaler".to_string(),
                address: format!("Wholesale Market, {}", location),
                contact: "+91 91234 56780".to_string(),
                price_range: "Spot payment at prevailing wholesale rate".to_string(),
                buying_days: "All days".to_string(),
            },
            MarketVendor {
                name: format!("e-NAM Trading Point, {}", location),
                market_type: "Online national market".to_string(),
                address: format!("APMC Yard, {}", location),
                contact: "enam.gov.in".to_string(),
                price_range: format!("Competitive online bids for {}", crop),
                buying_days: "Monday to Saturday".to_string(),
            },
        ],
    }
}

pub fn government_organizations(request: &DirectoryRequest) -> GovernmentOrganizationsResponse {
    let location = request.location();
    GovernmentOrganizationsResponse {
        location: location.to_string(),
        organizations: vec![
            GovernmentOrganization {
                name: format!("Krishi Vigyan Kendra, {}", location),
                department: "Indian Council of Agricultural Research".to_string(),
                address: format!("KVK Campus, {}", location),
                contact: "1800-180-1551".to_string(),
                services: vec![
                    "Soil testing".to_string(),
                    "Farmer training".to_string(),
                    "Seed and sapling supply".to_string(),
                ],
            },
            GovernmentOrganization {
                name: format!("District Agriculture Office, {}", location),
                department: "State Department of Agriculture".to_string(),
                address: format!("Collectorate Complex, {}", location),
                contact: "1800-180-1551".to_string(),
                services: vec![
                    "Subsidy applications".to_string(),
                    "Crop insurance enrolment".to_string(),
                    "Input distribution".to_string(),
                ],
            },
            GovernmentOrganization {
                name: format!("Agricultural Technology Management Agency, {}", location),
                department: "Ministry of Agriculture and Farmers Welfare".to_string(),
                address: format!("Block Development Office, {}", location),
                contact: "atma@agriculture.gov.in".to_string(),
                services: vec![
                    "Extension services".to_string(),
                    "Demonstration plots".to_string(),
                ],
            },
            GovernmentOrganization {
                name: format!("NABARD District Office, {}", location),
                department: "National Bank for Agriculture and Rural Development".to_string(),
                address: format!("Civil Lines, {}", location),
                contact: "nabard.org".to_string(),
                services: vec![
                    "Farmer producer organisation support".to_string(),
                    "Watershed development".to_string(),
                ],
            },
        ],
    }
}

pub fn bank_loans(request: &DirectoryRequest) -> BankLoansResponse {
    let (location, crop) = (request.location(), request.crop());
    BankLoansResponse {
        location: location.to_string(),
        crop: crop.to_string(),
        schemes: vec![
            LoanScheme {
                bank: "State Bank of India".to_string(),
                scheme_name: "Kisan Credit Card".to_string(),
                interest_rate: "7% (4% with prompt repayment)".to_string(),
                max_amount: "Rs. 3,00,000".to_string(),
                tenure: "5 years, renewed annually".to_string(),
                eligibility: format!("Owner or tenant farmers cultivating {}", crop),
                branch: format!("SBI Main Branch, {}", location),
            },
            LoanScheme {
                bank: "NABARD via Regional Rural Bank".to_string(),
                scheme_name: format!("Crop loan for {}", crop),
                interest_rate: "7% per annum".to_string(),
                max_amount: "Based on scale of finance for the district".to_string(),
                tenure: "Up to 12 months".to_string(),
                eligibility: "Small and marginal farmers".to_string(),
                branch: format!("Gramin Bank, {}", location),
            },
            LoanScheme {
                bank: format!("{} District Cooperative Bank", location),
                scheme_name: "Short-term seasonal agricultural operations".to_string(),
                interest_rate: "6% to 7% per annum".to_string(),
                max_amount: "Rs. 1,60,000 without collateral".to_string(),
                tenure: "One crop season".to_string(),
                eligibility: "Members of the primary agricultural credit society".to_string(),
                branch: format!("Head Office, {}", location),
            },
        ],
    }
}
