//! src/app/etat.rs
//!
//! État UI (sans vue, sans calcul).
//!
//! Rôle : contenir les saisies, le dernier résultat, l’itération sélectionnée
//! et l’erreur éventuelle, avec des opérations simples sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (le noyau est appelé par vue.rs).
//! - L’index sélectionné est toujours borné à [0, n-1].
//! - Une erreur efface le résultat précédent.

use crate::noyau::{Probleme, ResultatBissection};

pub const FONCTION_DEFAUT: &str = "x^3 - x - 2";
pub const A_DEFAUT: &str = "1";
pub const B_DEFAUT: &str = "2";
pub const TOLERANCE_DEFAUT: &str = "0.001";

#[derive(Clone, Debug)]
pub struct AppBissection {
    // --- saisies ---
    pub fonction: String,
    pub a: String,
    pub b: String,
    pub tolerance: String,

    // --- dernier calcul réussi ---
    pub probleme: Option<Probleme>,
    pub resultat: Option<ResultatBissection>,
    /// Itération affichée (0-based).
    pub index: usize,
    /// Résolution rédigée du dernier résultat.
    pub demarche: Vec<String>,

    pub erreur: String,

    // --- vue du tracé ---
    /// Fenêtre x choisie au glisser ; None = fenêtre automatique.
    pub zoom: Option<[f64; 2]>,
    /// Abscisse écran du début du glisser en cours.
    pub debut_glisse: Option<f32>,

    // Redonne le focus au champ f(x) après un clic.
    pub focus_fonction: bool,
}

impl Default for AppBissection {
    fn default() -> Self {
        Self {
            fonction: FONCTION_DEFAUT.to_string(),
            a: A_DEFAUT.to_string(),
            b: B_DEFAUT.to_string(),
            tolerance: TOLERANCE_DEFAUT.to_string(),
            probleme: None,
            resultat: None,
            index: 0,
            demarche: Vec::new(),
            erreur: String::new(),
            zoom: None,
            debut_glisse: None,
            focus_fonction: true,
        }
    }
}

impl AppBissection {
    /// Dépose un calcul réussi ; la sélection repart de la première itération.
    pub fn set_resultats(
        &mut self,
        probleme: Probleme,
        resultat: ResultatBissection,
        demarche: Vec<String>,
    ) {
        self.erreur.clear();
        self.probleme = Some(probleme);
        self.resultat = Some(resultat);
        self.demarche = demarche;
        self.index = 0;
        self.reinitialiser_vue();
    }

    /// Message affiché tel quel ; aucun résultat périmé ne reste visible.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.effacer_resultats();
    }

    fn effacer_resultats(&mut self) {
        self.probleme = None;
        self.resultat = None;
        self.demarche.clear();
        self.index = 0;
        self.reinitialiser_vue();
    }

    /// Saisies par défaut, résultats et erreur effacés.
    pub fn reinitialiser(&mut self) {
        *self = Self::default();
    }

    /// Zoom horizontal sur [x0, x1] (ordre indifférent) ; un simple clic est ignoré.
    pub fn zoomer(&mut self, x0: f64, x1: f64) {
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        if lo.is_finite() && hi.is_finite() && hi - lo > 1e-12 * lo.abs().max(1.0) {
            self.zoom = Some([lo, hi]);
        }
    }

    pub fn reinitialiser_vue(&mut self) {
        self.zoom = None;
        self.debut_glisse = None;
    }

    pub fn nb_iterations(&self) -> usize {
        self.resultat.as_ref().map_or(0, |r| r.iterations().len())
    }

    /// Sélection bornée ; sans résultat, l’index reste 0.
    pub fn selectionner(&mut self, index: usize) {
        self.index = self.resultat.as_ref().map_or(0, |r| r.borner_index(index));
    }

    pub fn precedente(&mut self) {
        self.selectionner(self.index.saturating_sub(1));
    }

    pub fn suivante(&mut self) {
        self.selectionner(self.index + 1);
    }
}
