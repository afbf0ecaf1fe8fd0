// src/noyau/expr.rs
//
// AST numérique (f64) sur une seule variable liée x.
// - Nombre : littéral
// - X      : la variable
// - Pi     : constante π
// - Appel  : fonction de la liste blanche (les alias sec/cosec/cosinln sont déjà dépliés)
//
// IMPORTANT (SAFE):
// - evaluer() est une descente récursive pure : aucun état ambiant, aucun effet de bord.
// - Toute valeur intermédiaire non finie est une erreur (jamais un infini silencieux).

use super::erreur::{CauseEvaluation, ErreurEvaluation};

/// Fonctions primitives évaluables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log10,
    Ln,
    Exp,
    Abs,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log10 => "log",
            Fonction::Ln => "ln",
            Fonction::Exp => "exp",
            Fonction::Abs => "abs",
        }
    }

    fn appliquer(self, v: f64, x: f64) -> Result<f64, ErreurEvaluation> {
        let hors_domaine = || ErreurEvaluation::new(x, CauseEvaluation::HorsDomaine(self.nom()));

        let r = match self {
            Fonction::Sin => v.sin(),
            Fonction::Cos => v.cos(),
            Fonction::Tan => v.tan(),
            Fonction::Sqrt => {
                if v < 0.0 {
                    return Err(hors_domaine());
                }
                v.sqrt()
            }
            Fonction::Log10 => {
                if v <= 0.0 {
                    return Err(hors_domaine());
                }
                v.log10()
            }
            Fonction::Ln => {
                if v <= 0.0 {
                    return Err(hors_domaine());
                }
                v.ln()
            }
            Fonction::Exp => v.exp(),
            Fonction::Abs => v.abs(),
        };
        fini(r, x)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    X,
    Pi,

    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn appel(f: Fonction, arg: Expr) -> Expr {
        Expr::Appel(f, Box::new(arg))
    }

    /// 1 / e
    pub fn inverse(e: Expr) -> Expr {
        Expr::Div(Box::new(Expr::Nombre(1.0)), Box::new(e))
    }

    /// Évalue l'arbre en `x`.
    pub fn evaluer(&self, x: f64) -> Result<f64, ErreurEvaluation> {
        use Expr::*;

        match self {
            Nombre(v) => fini(*v, x),
            X => fini(x, x),
            Pi => Ok(std::f64::consts::PI),

            Neg(a) => Ok(-a.evaluer(x)?),
            Add(a, b) => fini(a.evaluer(x)? + b.evaluer(x)?, x),
            Sub(a, b) => fini(a.evaluer(x)? - b.evaluer(x)?, x),
            Mul(a, b) => fini(a.evaluer(x)? * b.evaluer(x)?, x),

            Div(a, b) => {
                let num = a.evaluer(x)?;
                let den = b.evaluer(x)?;
                if den == 0.0 {
                    return Err(ErreurEvaluation::new(x, CauseEvaluation::DivisionParZero));
                }
                fini(num / den, x)
            }

            Pow(a, b) => {
                let base = a.evaluer(x)?;
                let exposant = b.evaluer(x)?;
                if base == 0.0 && exposant < 0.0 {
                    return Err(ErreurEvaluation::new(x, CauseEvaluation::DivisionParZero));
                }
                // base négative et exposant non entier => NaN
                if base < 0.0 && exposant.fract() != 0.0 {
                    return Err(ErreurEvaluation::new(x, CauseEvaluation::HorsDomaine("^")));
                }
                fini(base.powf(exposant), x)
            }

            Appel(f, a) => f.appliquer(a.evaluer(x)?, x),
        }
    }
}

fn fini(v: f64, x: f64) -> Result<f64, ErreurEvaluation> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEvaluation::new(x, CauseEvaluation::NonFini))
    }
}
