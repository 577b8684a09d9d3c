use serde::Serialize;

/// Per-country set of regional emblems a configuration's `region` indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionSet {
    None,
    GermanStates,
    AustrianStates,
    SwissCantons,
}

const GERMAN_STATES: &[(&str, &str)] = &[
    ("BW", "Baden-Württemberg"),
    ("BY", "Bayern"),
    ("BE", "Berlin"),
    ("BB", "Brandenburg"),
    ("HB", "Bremen"),
    ("HH", "Hamburg"),
    ("HE", "Hessen"),
    ("MV", "Mecklenburg-Vorpommern"),
    ("NI", "Niedersachsen"),
    ("NW", "Nordrhein-Westfalen"),
    ("RP", "Rheinland-Pfalz"),
    ("SL", "Saarland"),
    ("SN", "Sachsen"),
    ("ST", "Sachsen-Anhalt"),
    ("SH", "Schleswig-Holstein"),
    ("TH", "Thüringen"),
];

const AUSTRIAN_STATES: &[(&str, &str)] = &[
    ("B", "Burgenland"),
    ("K", "Kärnten"),
    ("N", "Niederösterreich"),
    ("O", "Oberösterreich"),
    ("S", "Salzburg"),
    ("ST", "Steiermark"),
    ("T", "Tirol"),
    ("V", "Vorarlberg"),
    ("W", "Wien"),
];

const SWISS_CANTONS: &[(&str, &str)] = &[
    ("AG", "Aargau"),
    ("AI", "Appenzell Innerrhoden"),
    ("AR", "Appenzell Ausserrhoden"),
    ("BE", "Bern"),
    ("BL", "Basel-Landschaft"),
    ("BS", "Basel-Stadt"),
    ("FR", "Fribourg"),
    ("GE", "Genève"),
    ("GL", "Glarus"),
    ("GR", "Graubünden"),
    ("JU", "Jura"),
    ("LU", "Luzern"),
    ("NE", "Neuchâtel"),
    ("NW", "Nidwalden"),
    ("OW", "Obwalden"),
    ("SG", "St. Gallen"),
    ("SH", "Schaffhausen"),
    ("SO", "Solothurn"),
    ("SZ", "Schwyz"),
    ("TG", "Thurgau"),
    ("TI", "Ticino"),
    ("UR", "Uri"),
    ("VD", "Vaud"),
    ("VS", "Valais"),
    ("ZG", "Zug"),
    ("ZH", "Zürich"),
];

impl RegionSet {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            RegionSet::None => &[],
            RegionSet::GermanStates => GERMAN_STATES,
            RegionSet::AustrianStates => AUSTRIAN_STATES,
            RegionSet::SwissCantons => SWISS_CANTONS,
        }
    }

    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(code, _)| *code)
    }

    pub fn name(self, code: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, name)| *name)
    }

    pub fn contains(self, code: &str) -> bool {
        self.name(code).is_some()
    }

    /// First entry of the set, used when a configuration carries a region from another country.
    pub fn default_code(self) -> Option<&'static str> {
        self.table().first().map(|(code, _)| *code)
    }
}
