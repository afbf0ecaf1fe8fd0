// src/noyau/erreur.rs
//
// Erreurs du noyau (typées).
// - ErreurExpression : texte de f(x) refusé (jetons, parenthèses, grammaire)
// - ErreurEvaluation : f(x) non définie en un point précis
// - ErreurBissection : tout ce qui peut faire échouer un calcul complet
//
// Les messages sont affichés tels quels par la vue.

use thiserror::Error;

/// Expression refusée à l'analyse (jamais exécutée).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurExpression {
    #[error("expression vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("identifiant inconnu: {0}")]
    IdentifiantInconnu(String),

    #[error("la fonction {0} doit être suivie de '('")]
    FonctionSansParenthese(String),

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseOrpheline,

    #[error("expression mal formée: {0}")]
    MalFormee(&'static str),

    #[error("expression trop imbriquée (profondeur > {limite})")]
    TropProfonde { limite: usize },

    #[error("expression trop longue (plus de {limite} éléments)")]
    TropLongue { limite: usize },
}

/// Cause d'un échec d'évaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CauseEvaluation {
    DivisionParZero,
    HorsDomaine(&'static str),
    NonFini,
}

impl std::fmt::Display for CauseEvaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CauseEvaluation::DivisionParZero => write!(f, "division par zéro"),
            CauseEvaluation::HorsDomaine(nom) => write!(f, "argument hors du domaine de {nom}"),
            CauseEvaluation::NonFini => write!(f, "résultat non fini (NaN ou infini)"),
        }
    }
}

/// f(x) ne produit pas de réel fini en `x`.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("f({x}) non définie: {cause}")]
pub struct ErreurEvaluation {
    pub x: f64,
    pub cause: CauseEvaluation,
}

impl ErreurEvaluation {
    pub fn new(x: f64, cause: CauseEvaluation) -> Self {
        Self { x, cause }
    }
}

/// Échec d'un calcul de bissection (aucune correction automatique).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurBissection {
    #[error("fonction invalide: {0}")]
    Expression(#[from] ErreurExpression),

    #[error("erreur d'évaluation: {0}")]
    Evaluation(#[from] ErreurEvaluation),

    #[error("valeur invalide pour {champ}: {texte:?}")]
    EntreeInvalide { champ: &'static str, texte: String },

    #[error("la borne a doit être strictement inférieure à b (a = {a}, b = {b})")]
    IntervalleInvalide { a: f64, b: f64 },

    #[error("la tolérance doit être strictement positive (tolérance = {tolerance})")]
    ToleranceInvalide { tolerance: f64 },

    #[error("f(a) et f(b) doivent être de signes opposés (f(a) = {fa}, f(b) = {fb})")]
    PasDeChangementDeSigne { fa: f64, fb: f64 },
}
