//! Noyau : analyse et évaluation de f(x) (pipeline réel)
//!
//! tokenize -> normaliser (× implicite, parenthèses) -> RPN -> Expr -> forme normalisée
//!
//! Une `Expression` construite avec succès ne sait faire qu'une chose :
//! évaluer l'arbre sur x. Aucun code n'est généré ni exécuté.

use tracing::debug;

use super::erreur::{ErreurEvaluation, ErreurExpression};
use super::expr::Expr;
use super::format::format_expr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, normaliser, to_rpn};

/// f(x) validée : texte normalisé + arbre évaluable.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    texte: String,
    jetons: String,
    rpn: String,
    arbre: Expr,
}

impl Expression {
    /// Analyse un texte saisi par l’utilisateur.
    pub fn analyser(texte: &str) -> Result<Self, ErreurExpression> {
        let s = texte.trim();
        if s.is_empty() {
            return Err(ErreurExpression::Vide);
        }

        // 1) Jetons (+ × implicite, parenthèses équilibrées)
        let jetons = normaliser(&tokenize(s)?)?;

        // 2) RPN
        let rpn = to_rpn(&jetons)?;

        // 3) AST
        let arbre = from_rpn(&rpn)?;
        let texte = format_expr(&arbre);
        debug!(entree = s, normalisee = %texte, "expression analysée");

        Ok(Self {
            texte,
            jetons: format_tokens(&jetons),
            rpn: format_tokens(&rpn),
            arbre,
        })
    }

    /// f(x) ; erreur si le résultat (ou un calcul intermédiaire) n’est pas fini.
    pub fn evaluer(&self, x: f64) -> Result<f64, ErreurEvaluation> {
        self.arbre.evaluer(x)
    }

    /// Forme normalisée (ex: "2x^2" -> "2*x^2").
    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn jetons(&self) -> &str {
        &self.jetons
    }

    pub fn rpn(&self) -> &str {
        &self.rpn
    }

    pub fn arbre(&self) -> &Expr {
        &self.arbre
    }
}
