// * Read-only lookup tables for the refinery
// * Built once at start-up and shared by reference; nothing mutates them afterwards.
// * All phrases are stored pre-normalised (see text::normalize_label).

use std::collections::HashMap;

use crate::refinery::cargo::CargoCategory;
use crate::refinery::columns::SemanticKey;

// * Header synonyms in match priority order.
// ! Order matters: "classe duv" must be tried before "duv", "navio" before "nav".
const HEADER_SYNONYMS: &[(SemanticKey, &[&str])] = &[
    (SemanticKey::Imo, &["imo", "lloyd"]),
    (SemanticKey::Ship, &["navio", "embarcacao", "vessel", "ship"]),
    (SemanticKey::Flag, &["bandeira", "flag", "pais"]),
    (
        SemanticKey::LengthDraft,
        &["comp calado", "comprimento", "calado", "loa", "length", "draft"],
    ),
    (SemanticKey::Nav, &["navegacao", "nav"]),
    (SemanticKey::Arrival, &["chegada", "previsao", "eta", "arrival", "data"]),
    (SemanticKey::Notice, &["aviso", "notice", "emb desc", "embarque"]),
    (SemanticKey::Agency, &["agencia", "agente", "agency", "agent"]),
    (SemanticKey::Operation, &["operacao", "operation", "operac"]),
    (SemanticKey::Goods, &["mercadoria", "produto", "carga", "goods", "cargo"]),
    (SemanticKey::Weight, &["peso", "tonelagem", "quantidade", "weight"]),
    (SemanticKey::Voyage, &["viagem", "voyage"]),
    (SemanticKey::DuvClass, &["classe duv", "duv classe", "classe", "class"]),
    (SemanticKey::Duv, &["duv"]),
    (SemanticKey::Pier, &["berco", "pier", "cais", "armazem"]),
    (SemanticKey::Terminal, &["terminal"]),
];

// * Portuguese country names and flag adjectives (normalised) to English country names
const COUNTRIES: &[(&str, &str)] = &[
    ("brasil", "Brazil"),
    ("brasileira", "Brazil"),
    ("brasileiro", "Brazil"),
    ("panama", "Panama"),
    ("panamenha", "Panama"),
    ("liberia", "Liberia"),
    ("liberiana", "Liberia"),
    ("ilhas marshall", "Marshall Islands"),
    ("marshall", "Marshall Islands"),
    ("malta", "Malta"),
    ("maltesa", "Malta"),
    ("bahamas", "Bahamas"),
    ("bahamense", "Bahamas"),
    ("singapura", "Singapore"),
    ("cingapura", "Singapore"),
    ("hong kong", "Hong Kong"),
    ("grecia", "Greece"),
    ("grega", "Greece"),
    ("chipre", "Cyprus"),
    ("cipriota", "Cyprus"),
    ("portugal", "Portugal"),
    ("portuguesa", "Portugal"),
    ("madeira", "Portugal"),
    ("noruega", "Norway"),
    ("norueguesa", "Norway"),
    ("dinamarca", "Denmark"),
    ("dinamarquesa", "Denmark"),
    ("alemanha", "Germany"),
    ("alema", "Germany"),
    ("reino unido", "United Kingdom"),
    ("britanica", "United Kingdom"),
    ("inglaterra", "United Kingdom"),
    ("ilha de man", "Isle of Man"),
    ("gibraltar", "Gibraltar"),
    ("italia", "Italy"),
    ("italiana", "Italy"),
    ("franca", "France"),
    ("francesa", "France"),
    ("espanha", "Spain"),
    ("espanhola", "Spain"),
    ("holanda", "Netherlands"),
    ("holandesa", "Netherlands"),
    ("paises baixos", "Netherlands"),
    ("belgica", "Belgium"),
    ("belga", "Belgium"),
    ("luxemburgo", "Luxembourg"),
    ("suecia", "Sweden"),
    ("sueca", "Sweden"),
    ("finlandia", "Finland"),
    ("irlanda", "Ireland"),
    ("polonia", "Poland"),
    ("croacia", "Croatia"),
    ("russia", "Russia"),
    ("russa", "Russia"),
    ("turquia", "Turkey"),
    ("turca", "Turkey"),
    ("china", "China"),
    ("chinesa", "China"),
    ("japao", "Japan"),
    ("japonesa", "Japan"),
    ("coreia do sul", "South Korea"),
    ("coreia", "South Korea"),
    ("sul coreana", "South Korea"),
    ("india", "India"),
    ("indiana", "India"),
    ("filipinas", "Philippines"),
    ("indonesia", "Indonesia"),
    ("vietna", "Vietnam"),
    ("tailandia", "Thailand"),
    ("malasia", "Malaysia"),
    ("arabia saudita", "Saudi Arabia"),
    ("emirados arabes unidos", "United Arab Emirates"),
    ("egito", "Egypt"),
    ("africa do sul", "South Africa"),
    ("nigeria", "Nigeria"),
    ("togo", "Togo"),
    ("comores", "Comoros"),
    ("tuvalu", "Tuvalu"),
    ("barbados", "Barbados"),
    ("belize", "Belize"),
    ("bermudas", "Bermuda"),
    ("ilhas cayman", "Cayman Islands"),
    ("antigua e barbuda", "Antigua and Barbuda"),
    ("antigua barbuda", "Antigua and Barbuda"),
    ("sao vicente e granadinas", "Saint Vincent and the Grenadines"),
    ("sao cristovao e nevis", "Saint Kitts and Nevis"),
    ("estados unidos", "United States"),
    ("eua", "United States"),
    ("norte americana", "United States"),
    ("canada", "Canada"),
    ("mexico", "Mexico"),
    ("argentina", "Argentina"),
    ("uruguai", "Uruguay"),
    ("uruguaia", "Uruguay"),
    ("paraguai", "Paraguay"),
    ("chile", "Chile"),
    ("chilena", "Chile"),
    ("peru", "Peru"),
    ("peruana", "Peru"),
    ("colombia", "Colombia"),
    ("venezuela", "Venezuela"),
];

// * Substring heuristics applied when no exact country entry matches
const FLAG_HEURISTICS: &[(&str, &str)] = &[
    ("panamen", "Panama"),
    ("liberian", "Liberia"),
    ("maltes", "Malta"),
    ("marshall", "Marshall Islands"),
    ("brasil", "Brazil"),
    ("baham", "Bahamas"),
    ("singap", "Singapore"),
    ("cingap", "Singapore"),
    ("hong kong", "Hong Kong"),
    ("cipri", "Cyprus"),
    ("chipr", "Cyprus"),
    ("portugu", "Portugal"),
    ("norueg", "Norway"),
    ("dinamarq", "Denmark"),
    ("antigua", "Antigua and Barbuda"),
];

// * Cargo keywords by category, in classification priority order
const CARGO_KEYWORDS: &[(CargoCategory, &[&str])] = &[
    (
        CargoCategory::Container,
        &[
            "container",
            "conteiner",
            "contentor",
            "cntr",
            "teu",
            "maersk",
            "msc",
            "cma cgm",
            "hapag",
            "evergreen",
            "cosco",
            "hamburg sud",
            "zim",
            "tecon",
            "btp",
            "brasil terminal portuario",
            "santos brasil",
            "dp world",
            "embraport",
        ],
    ),
    (
        CargoCategory::Liquid,
        &[
            "granel liquido",
            "liquido",
            "oleo",
            "petroleo",
            "combustivel",
            "bunker",
            "diesel",
            "gasolina",
            "nafta",
            "etanol",
            "alcool",
            "metanol",
            "quimico",
            "glp",
            "gas",
            "suco",
            "soda caustica",
            "tanque",
            "ultracargo",
            "stolthaven",
            "transpetro",
        ],
    ),
    (
        CargoCategory::Bulk,
        &[
            "granel solido",
            "granel",
            "soja",
            "milho",
            "acucar",
            "farelo",
            "trigo",
            "cevada",
            "fertilizante",
            "adubo",
            "ureia",
            "potassio",
            "enxofre",
            "minerio",
            "carvao",
            "coque",
            "clinquer",
            "graos",
            "pellet",
        ],
    ),
];

// * Portuguese goods descriptions (normalised) to English
const GOODS_TERMS: &[(&str, &str)] = &[
    ("conteiner", "Container"),
    ("conteineres", "Containers"),
    ("container", "Container"),
    ("containers", "Containers"),
    ("carga geral", "General cargo"),
    ("carga conteinerizada", "Containerised cargo"),
    ("soja", "Soybeans"),
    ("soja em graos", "Soybeans"),
    ("farelo de soja", "Soybean meal"),
    ("oleo de soja", "Soybean oil"),
    ("milho", "Corn"),
    ("milho em graos", "Corn"),
    ("acucar", "Sugar"),
    ("acucar a granel", "Bulk sugar"),
    ("trigo", "Wheat"),
    ("cevada", "Barley"),
    ("cafe", "Coffee"),
    ("algodao", "Cotton"),
    ("celulose", "Pulp"),
    ("papel", "Paper"),
    ("fertilizante", "Fertilizer"),
    ("fertilizantes", "Fertilizers"),
    ("adubo", "Fertilizer"),
    ("ureia", "Urea"),
    ("enxofre", "Sulphur"),
    ("sal", "Salt"),
    ("carvao", "Coal"),
    ("coque", "Coke"),
    ("minerio", "Ore"),
    ("minerio de ferro", "Iron ore"),
    ("aco", "Steel"),
    ("produtos siderurgicos", "Steel products"),
    ("veiculos", "Vehicles"),
    ("automoveis", "Cars"),
    ("maquinas", "Machinery"),
    ("suco de laranja", "Orange juice"),
    ("suco", "Juice"),
    ("etanol", "Ethanol"),
    ("alcool", "Alcohol"),
    ("metanol", "Methanol"),
    ("oleo diesel", "Diesel oil"),
    ("diesel", "Diesel"),
    ("gasolina", "Gasoline"),
    ("nafta", "Naphtha"),
    ("petroleo", "Crude oil"),
    ("oleo combustivel", "Fuel oil"),
    ("bunker", "Bunker fuel"),
    ("glp", "LPG"),
    ("gas", "Gas"),
    ("produtos quimicos", "Chemicals"),
    ("quimicos", "Chemicals"),
    ("soda caustica", "Caustic soda"),
    ("granel solido", "Dry bulk"),
    ("granel liquido", "Liquid bulk"),
    ("passageiros", "Passengers"),
    ("lastro", "Ballast"),
    ("vazio", "Empty"),
    ("vazios", "Empty"),
];

/// Read-only lookup tables shared by every refinery stage
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub header_synonyms: Vec<(SemanticKey, &'static [&'static str])>,
    pub countries: HashMap<&'static str, &'static str>,
    pub flag_heuristics: Vec<(&'static str, &'static str)>,
    pub cargo_keywords: Vec<(CargoCategory, &'static [&'static str])>,
    pub goods_terms: HashMap<&'static str, &'static str>,
}

impl Vocabulary {
    /// Builds the tables used against the port authority's listing
    pub fn standard() -> Self {
        Self {
            header_synonyms: HEADER_SYNONYMS.to_vec(),
            countries: COUNTRIES.iter().copied().collect(),
            flag_heuristics: FLAG_HEURISTICS.to_vec(),
            cargo_keywords: CARGO_KEYWORDS.to_vec(),
            goods_terms: GOODS_TERMS.iter().copied().collect(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}
