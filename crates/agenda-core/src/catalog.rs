//! Directory catalog
//!
//! Static lookup tables for the request form: coordinators, professions,
//! per-profession staff rosters and block-type labels. The built-in tables
//! describe the clinic; a replacement catalog can be loaded from TOML.

use crate::error::CatalogError;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

static CESFAM: Lazy<Directory> = Lazy::new(build_cesfam);

/// Lookup tables consumed by the request form
///
/// Every list keeps its declaration order; the first entry of each list is
/// the form default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Coordinators allowed to submit requests
    pub coordinators: Vec<String>,
    /// Block category labels
    pub block_types: Vec<String>,
    /// Profession to ordered staff roster; key order is the profession order
    pub rosters: IndexMap<String, Vec<String>>,
}

impl Directory {
    /// Built-in clinic catalog
    #[must_use]
    pub fn cesfam() -> Self {
        CESFAM.clone()
    }

    /// Parse a catalog from TOML
    ///
    /// # Errors
    /// - `CatalogError::Parse` on malformed TOML
    /// - `CatalogError::Invalid` when coordinators, block types or
    ///   professions are empty
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let directory: Self = toml::from_str(source)?;
        directory.check()?;
        Ok(directory)
    }

    /// Load a catalog from a TOML file
    ///
    /// # Errors
    /// IO failures plus everything [`Directory::from_toml_str`] reports.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        Self::from_toml_str(&source)
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.coordinators.is_empty() {
            return Err(CatalogError::Invalid("no coordinators".to_string()));
        }
        if self.block_types.is_empty() {
            return Err(CatalogError::Invalid("no block types".to_string()));
        }
        if self.rosters.is_empty() {
            return Err(CatalogError::Invalid("no professions".to_string()));
        }
        Ok(())
    }

    /// Professions in catalog order
    pub fn professions(&self) -> impl Iterator<Item = &str> {
        self.rosters.keys().map(String::as_str)
    }

    /// Roster for a profession; unknown professions have an empty roster
    #[must_use]
    pub fn roster(&self, profession: &str) -> &[String] {
        self.rosters.get(profession).map_or(&[], Vec::as_slice)
    }

    /// Check whether a profession exists
    #[inline]
    #[must_use]
    pub fn has_profession(&self, profession: &str) -> bool {
        self.rosters.contains_key(profession)
    }

    /// Check whether a coordinator exists
    #[must_use]
    pub fn has_coordinator(&self, name: &str) -> bool {
        self.coordinators.iter().any(|c| c == name)
    }

    /// Check whether a block type exists
    #[must_use]
    pub fn has_block_type(&self, label: &str) -> bool {
        self.block_types.iter().any(|t| t == label)
    }

    /// Check roster membership
    #[must_use]
    pub fn is_on_roster(&self, profession: &str, professional: &str) -> bool {
        self.roster(profession).iter().any(|p| p == professional)
    }

    /// First coordinator, the form default
    #[must_use]
    pub fn default_coordinator(&self) -> Option<&str> {
        self.coordinators.first().map(String::as_str)
    }

    /// First profession, the form default
    #[must_use]
    pub fn default_profession(&self) -> Option<&str> {
        self.professions().next()
    }

    /// First block type, the form default
    #[must_use]
    pub fn default_block_type(&self) -> Option<&str> {
        self.block_types.first().map(String::as_str)
    }

    /// Staff member preselected when a profession is chosen
    ///
    /// Always derived from the profession; empty rosters yield `None`.
    #[must_use]
    pub fn default_professional(&self, profession: &str) -> Option<&str> {
        self.roster(profession).first().map(String::as_str)
    }

    /// Explicit choice, or the derived default for the profession
    #[must_use]
    pub fn resolve_professional<'a>(
        &'a self,
        profession: &str,
        chosen: Option<&'a str>,
    ) -> Option<&'a str> {
        chosen.or_else(|| self.default_professional(profession))
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::cesfam()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn build_cesfam() -> Directory {
    let coordinators = owned(&[
        "Directora",
        "Coordinadora Técnica",
        "Coordinador Rural Cordillera",
        "Coordinador Rural Valle",
        "Coordinador Sector 1",
        "Coordinador Sector 2",
        "Coordinador Convenios",
        "Coordinador Some",
        "Coordinador Gore",
    ]);

    let block_types = owned(&[
        "Feriado Legal",
        "Permiso Administrativo",
        "Permiso Compensatorio",
        "Permiso sin goce",
        "Permiso Especial",
        "Permiso de capacitación",
        "Encomendada de Capacitación",
        "Reunión extra programática",
    ]);

    let rosters: [(&str, &[&str]); 16] = [
        (
            "Odontólogo",
            &[
                "MATIAS PERALTA", "SEBASTIAN CARDENAS", "HUGO OLAVE", "ARMANDO BRAVO",
                "NICOLE CAZAUX", "COSNTANZA ARRIAGADA", "SEBASTIAN ELGUETA", "VALERIA CASTRO",
                "FRANCISCA PORTOLES", "LUCAS CASTILLO", "KARINA FLANDEZ", "JUAN PABLO MILLA",
                "CATALINA GALLARDO",
            ],
        ),
        (
            "Médico",
            &[
                "JUAN CASTELLANOS", "AIMEE RODRIGUEZ", "JOAQUIN RODRIGUEZ", "ROBERTO MARTINEZ",
                "JOSEFA LOPEZ", "CATALINA PARDO", "FABIAN SEPULVEDA", "RAYEN GONZALEZ GORE",
                "EMILIO FIGUEROA", "CONSTANZA CANELO", "MEDICO CECOSF NUEVO",
            ],
        ),
        ("Asistente Social", &["CLAUDIA HUAIQUE", "RICARDO CEBALLOS", "PAMELA ROMERO"]),
        (
            "Enfermero/a",
            &[
                "ALEJANDRA GODOY", "CAMILA GODOY", "GERARDO ARCE", "YONATHAN MANSILLA",
                "ANA TORRES", "ALEJANDRA SILVA", "ROCIO ZAMBRANO", "KARLA LERMANDA",
                "DANIELA ULLOA", "KAREN AGUERO", "MARIA ELENA HIDALGO", "LORETO FERNANDEZ",
            ],
        ),
        (
            "Kinesiólogo/a",
            &[
                "MACARENA CACERES", "DANIELA SAN MARTIN", "KARLA VALENZUELA", "JUAN YAVAR",
                "CLAUDIO PEREZ", "MAURICIO CERNA", "JORDY OPAZO", "KATHERINE VARGAS",
            ],
        ),
        (
            "Matrón/a",
            &[
                "KARINA TIZNADO", "CARLA BOUTAUD", "KARINA RIOS", "STEPHANIE VAN WICJK",
                "PAMELA GONZALEZ", "FABIAN SANDOVAL", "MARIA JOSE LEIVA",
            ],
        ),
        (
            "Psicólogo/a",
            &["KAREN ANGULO", "MARLY MARTINEZ", "CAMILA FLOREZ", "VALERIA SOLIS", "ROSARIO MANNS"],
        ),
        (
            "Nutricionista",
            &[
                "MACARENA MELLA", "DANIELA ICETA", "GLORIA HUAIQUIPAN", "NATALIA CONCHA",
                "ARACELYS MERCHANTT", "EMILIA ANTILLANCA",
            ],
        ),
        ("Educadora", &["JEANNETTE FARFAN"]),
        ("Fonoaudiólogo/a", &["YENIFER JIMENEZ"]),
        ("Terapeuta Ocupacional", &["CAMILO VERA", "SOLEDAD MORALES", "CLAUDIA LEHUEY"]),
        ("Profesor EF", &["EDER ANABALON", "LEONARDO VALENZUELA"]),
        ("Tecnólogo Médico", &["DANIEL VERA"]),
        ("Químico Farmacéutico", &["EDUARDO BRAVO"]),
        ("Podóloga", &["CLAUDIA CORVALAN", "ROCIO SANDOVAL"]),
        (
            "TENS",
            &[
                "YOCELYN SAEZ", "BEATRIZ VARGAS", "STHEPAHIE WEISER", "PAULA MANSILLA",
                "SERGIO ZAMBRANO", "PAOLA FIGUEROA", "VINKA SEPULVEDA", "GLORIA REYES",
                "JOSE MAUREIRA", "HERNAN FILCUN", "VALESKA TORRES", "LUCRECIA MANQUEL",
                "YENNIFER TORRES", "MARIANA GALLARDO", "ANDREA JAURE", "MACARENA SEPULVEDA",
                "GLORIA GONZALEZ", "ANTONIETA ESTRADA", "CARLA VEGA", "MONICA REYES",
                "VANESSA VEGA", "JAIME MARTINEZ", "DAPNER MAUREIRA", "GABRIELA ARAVENA",
            ],
        ),
    ];

    Directory {
        coordinators,
        block_types,
        rosters: rosters
            .iter()
            .map(|(profession, staff)| ((*profession).to_string(), owned(staff)))
            .collect(),
    }
}
