use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Supported plate countries, identified by their international vehicle registration code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Country {
    #[default]
    Germany,
    Austria,
    Belgium,
    Bulgaria,
    Croatia,
    Cyprus,
    CzechRepublic,
    Denmark,
    Estonia,
    Finland,
    France,
    Greece,
    Hungary,
    Ireland,
    Italy,
    Latvia,
    Lithuania,
    Luxembourg,
    Malta,
    Netherlands,
    Poland,
    Portugal,
    Romania,
    Slovakia,
    Slovenia,
    Spain,
    Sweden,
    Switzerland,
    Liechtenstein,
    UnitedKingdom,
    Norway,
}

impl Country {
    pub const ALL: [Country; 31] = [
        Country::Germany,
        Country::Austria,
        Country::Belgium,
        Country::Bulgaria,
        Country::Croatia,
        Country::Cyprus,
        Country::CzechRepublic,
        Country::Denmark,
        Country::Estonia,
        Country::Finland,
        Country::France,
        Country::Greece,
        Country::Hungary,
        Country::Ireland,
        Country::Italy,
        Country::Latvia,
        Country::Lithuania,
        Country::Luxembourg,
        Country::Malta,
        Country::Netherlands,
        Country::Poland,
        Country::Portugal,
        Country::Romania,
        Country::Slovakia,
        Country::Slovenia,
        Country::Spain,
        Country::Sweden,
        Country::Switzerland,
        Country::Liechtenstein,
        Country::UnitedKingdom,
        Country::Norway,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Country::Germany => "D",
            Country::Austria => "A",
            Country::Belgium => "B",
            Country::Bulgaria => "BG",
            Country::Croatia => "HR",
            Country::Cyprus => "CY",
            Country::CzechRepublic => "CZ",
            Country::Denmark => "DK",
            Country::Estonia => "EST",
            Country::Finland => "FIN",
            Country::France => "F",
            Country::Greece => "GR",
            Country::Hungary => "H",
            Country::Ireland => "IRL",
            Country::Italy => "I",
            Country::Latvia => "LV",
            Country::Lithuania => "LT",
            Country::Luxembourg => "L",
            Country::Malta => "M",
            Country::Netherlands => "NL",
            Country::Poland => "PL",
            Country::Portugal => "P",
            Country::Romania => "RO",
            Country::Slovakia => "SK",
            Country::Slovenia => "SLO",
            Country::Spain => "E",
            Country::Sweden => "S",
            Country::Switzerland => "CH",
            Country::Liechtenstein => "FL",
            Country::UnitedKingdom => "UK",
            Country::Norway => "N",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Country::Germany => "Germany",
            Country::Austria => "Austria",
            Country::Belgium => "Belgium",
            Country::Bulgaria => "Bulgaria",
            Country::Croatia => "Croatia",
            Country::Cyprus => "Cyprus",
            Country::CzechRepublic => "Czech Republic",
            Country::Denmark => "Denmark",
            Country::Estonia => "Estonia",
            Country::Finland => "Finland",
            Country::France => "France",
            Country::Greece => "Greece",
            Country::Hungary => "Hungary",
            Country::Ireland => "Ireland",
            Country::Italy => "Italy",
            Country::Latvia => "Latvia",
            Country::Lithuania => "Lithuania",
            Country::Luxembourg => "Luxembourg",
            Country::Malta => "Malta",
            Country::Netherlands => "Netherlands",
            Country::Poland => "Poland",
            Country::Portugal => "Portugal",
            Country::Romania => "Romania",
            Country::Slovakia => "Slovakia",
            Country::Slovenia => "Slovenia",
            Country::Spain => "Spain",
            Country::Sweden => "Sweden",
            Country::Switzerland => "Switzerland",
            Country::Liechtenstein => "Liechtenstein",
            Country::UnitedKingdom => "United Kingdom",
            Country::Norway => "Norway",
        }
    }

    /// Whether the country issues plates under the EU format (blue band with the star ring).
    pub fn is_eu_member(self) -> bool {
        !matches!(
            self,
            Country::Switzerland | Country::Liechtenstein | Country::UnitedKingdom | Country::Norway
        )
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::UnknownCountry {
                code: code.to_string(),
            })
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
