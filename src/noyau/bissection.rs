//! Noyau : moteur de bissection
//!
//! Préconditions (dans cet ordre, chacune son erreur) :
//! 1. a, b, tolérance finis          -> EntreeInvalide
//! 2. a < b                          -> IntervalleInvalide
//! 3. tolérance > 0                  -> ToleranceInvalide
//! 4. f(a)·f(b) <= 0                 -> PasDeChangementDeSigne
//!
//! Les points 1 à 3 sont vérifiés AVANT toute évaluation de f.
//!
//! Boucle (au plus `max_iterations` tours) : c = (a+b)/2, f(a), f(b), f(c) réévalués
//! à chaque tour, enregistrement, arrêt si b-a < tolérance ou |f(c)| < seuil,
//! sinon on garde la moitié qui contient le changement de signe.
//! Atteindre la limite n'est pas une erreur.

use tracing::{debug, trace, warn};

use super::erreur::{ErreurBissection, ErreurEvaluation};
use super::eval::Expression;
use super::parametres::Parametres;

/// Ce que le moteur sait évaluer.
pub trait Evaluable {
    fn evaluer(&self, x: f64) -> Result<f64, ErreurEvaluation>;

    /// Texte affiché dans le résultat et la démarche.
    fn texte(&self) -> String {
        "f(x)".to_string()
    }
}

impl Evaluable for Expression {
    fn evaluer(&self, x: f64) -> Result<f64, ErreurEvaluation> {
        Expression::evaluer(self, x)
    }

    fn texte(&self) -> String {
        Expression::texte(self).to_string()
    }
}

impl<F> Evaluable for F
where
    F: Fn(f64) -> Result<f64, ErreurEvaluation>,
{
    fn evaluer(&self, x: f64) -> Result<f64, ErreurEvaluation> {
        self(x)
    }
}

/// Instantané d’une itération (jamais modifié après création).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Iteration {
    /// Rang, à partir de 1.
    pub index: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fa: f64,
    pub fb: f64,
    pub fc: f64,
    /// b - a, AVANT la coupe de ce tour.
    pub largeur: f64,
    pub tolerance_atteinte: bool,
}

/// Raison de fin de boucle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arret {
    ToleranceAtteinte,
    ZeroQuasiExact,
    MaxIterations,
}

impl Arret {
    pub fn description(self) -> &'static str {
        match self {
            Arret::ToleranceAtteinte => "largeur de l’intervalle sous la tolérance",
            Arret::ZeroQuasiExact => "|f(c)| quasi nul",
            Arret::MaxIterations => "nombre maximal d’itérations atteint (convergence partielle)",
        }
    }
}

/// Résultat complet d’une exécution. Chaque appel en produit un nouveau, indépendant.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultatBissection {
    fonction: String,
    a0: f64,
    b0: f64,
    tolerance: f64,
    iterations: Vec<Iteration>,
    racine: f64,
    arret: Arret,
}

impl ResultatBissection {
    pub fn fonction(&self) -> &str {
        &self.fonction
    }

    /// Intervalle de départ [a0, b0].
    pub fn bornes_initiales(&self) -> (f64, f64) {
        (self.a0, self.b0)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    pub fn iteration(&self, index: usize) -> Option<&Iteration> {
        self.iterations.get(index)
    }

    /// Estimation finale : c de la dernière itération.
    pub fn racine(&self) -> f64 {
        self.racine
    }

    pub fn arret(&self) -> Arret {
        self.arret
    }

    /// Index sélectionné (0-based) borné à [0, len-1].
    pub fn borner_index(&self, index: usize) -> usize {
        index.min(self.iterations.len().saturating_sub(1))
    }
}

/// Le sous-intervalle gauche [a, c] garde le changement de signe.
///
/// Test sur le produit : un produit qui sous-déborde vers ±0 retombe dans la
/// branche "a = c", comme un f(a)·f(c) nul.
pub(super) fn garder_gauche(fa: f64, fc: f64) -> bool {
    fa * fc < 0.0
}

/// Bissection avec les paramètres par défaut (100 itérations max).
pub fn executer<E: Evaluable + ?Sized>(
    f: &E,
    a: f64,
    b: f64,
    tolerance: f64,
) -> Result<ResultatBissection, ErreurBissection> {
    executer_avec(f, a, b, tolerance, &Parametres::default())
}

pub fn executer_avec<E: Evaluable + ?Sized>(
    f: &E,
    a: f64,
    b: f64,
    tolerance: f64,
    params: &Parametres,
) -> Result<ResultatBissection, ErreurBissection> {
    for (champ, v) in [("a", a), ("b", b), ("tolérance", tolerance)] {
        if !v.is_finite() {
            return Err(ErreurBissection::EntreeInvalide {
                champ,
                texte: v.to_string(),
            });
        }
    }
    if a >= b {
        return Err(ErreurBissection::IntervalleInvalide { a, b });
    }
    if tolerance <= 0.0 {
        return Err(ErreurBissection::ToleranceInvalide { tolerance });
    }

    let fa0 = f.evaluer(a)?;
    let fb0 = f.evaluer(b)?;
    if fa0 * fb0 > 0.0 {
        return Err(ErreurBissection::PasDeChangementDeSigne { fa: fa0, fb: fb0 });
    }

    let fonction = f.texte();
    debug!(%fonction, a, b, tolerance, "bissection: début");

    let (a0, b0) = (a, b);
    let (mut a, mut b) = (a, b);
    let mut iterations: Vec<Iteration> = Vec::with_capacity(params.max_iterations.min(128));
    let mut arret = Arret::MaxIterations;

    for index in 1..=params.max_iterations {
        let c = (a + b) / 2.0;
        let fa = f.evaluer(a)?;
        let fb = f.evaluer(b)?;
        let fc = f.evaluer(c)?;
        let largeur = b - a;
        let tolerance_atteinte = largeur < tolerance;

        trace!(index, a, b, c, fc, largeur, "bissection: itération");
        iterations.push(Iteration {
            index,
            a,
            b,
            c,
            fa,
            fb,
            fc,
            largeur,
            tolerance_atteinte,
        });

        if tolerance_atteinte {
            arret = Arret::ToleranceAtteinte;
            break;
        }
        if fc.abs() < params.seuil_zero {
            arret = Arret::ZeroQuasiExact;
            break;
        }

        if garder_gauche(fa, fc) {
            b = c;
        } else {
            a = c;
        }
    }

    let racine = iterations.last().map_or((a + b) / 2.0, |it| it.c);
    debug!(
        racine,
        iterations = iterations.len(),
        arret = arret.description(),
        "bissection: fin"
    );

    Ok(ResultatBissection {
        fonction,
        a0,
        b0,
        tolerance,
        iterations,
        racine,
        arret,
    })
}

/// Conversion texte -> réel fini (espaces ignorés, syntaxe Rust : "1e-3" accepté).
pub fn lire_reel(champ: &'static str, texte: &str) -> Result<f64, ErreurBissection> {
    match texte.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => {
            warn!(champ, texte, "valeur numérique refusée");
            Err(ErreurBissection::EntreeInvalide {
                champ,
                texte: texte.to_string(),
            })
        }
    }
}

/// Entrées validées d’un calcul : f(x) analysée + intervalle + tolérance.
#[derive(Clone, Debug, PartialEq)]
pub struct Probleme {
    pub expression: Expression,
    pub a: f64,
    pub b: f64,
    pub tolerance: f64,
}

impl Probleme {
    /// Textes -> réels d’abord, puis analyse de f(x).
    pub fn lire(
        fonction: &str,
        a: &str,
        b: &str,
        tolerance: &str,
    ) -> Result<Self, ErreurBissection> {
        let a = lire_reel("a", a)?;
        let b = lire_reel("b", b)?;
        let tolerance = lire_reel("tolérance", tolerance)?;
        let expression = Expression::analyser(fonction)?;
        Ok(Self {
            expression,
            a,
            b,
            tolerance,
        })
    }

    pub fn resoudre(&self) -> Result<ResultatBissection, ErreurBissection> {
        self.resoudre_avec(&Parametres::default())
    }

    pub fn resoudre_avec(&self, params: &Parametres) -> Result<ResultatBissection, ErreurBissection> {
        executer_avec(&self.expression, self.a, self.b, self.tolerance, params)
    }
}

/// API publique : tout en texte, comme saisi par l’utilisateur.
pub fn parse_et_executer(
    fonction: &str,
    a: &str,
    b: &str,
    tolerance: &str,
) -> Result<ResultatBissection, ErreurBissection> {
    Probleme::lire(fonction, a, b, tolerance)?.resoudre()
}
