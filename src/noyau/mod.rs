//! Noyau numérique de la bissection
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation (une passe, liste blanche de fonctions)
//! - rpn.rs        : × implicite + parenthèses, shunting-yard, construction Expr
//! - expr.rs       : AST f64 + évaluation pure
//! - eval.rs       : pipeline complet -> Expression
//! - bissection.rs : moteur (préconditions, boucle, résultat immuable)
//! - format.rs     : forme normalisée, précision fixe, lignes / CSV
//! - courbe.rs     : échantillonnage du tracé
//! - demarche.rs   : résolution rédigée
//! - parametres.rs : réglages par défaut
//! - erreur.rs     : erreurs typées

pub mod bissection;
pub mod courbe;
pub mod demarche;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod parametres;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;


// API utilisée par l’app
pub use bissection::{Probleme, ResultatBissection};
