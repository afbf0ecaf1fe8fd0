// src/noyau/parametres.rs
//
// Réglages du noyau (valeurs par défaut = comportement de référence).

/// Nombre maximal d’itérations d’une exécution.
pub const MAX_ITERATIONS: usize = 100;

/// |f(c)| en dessous de ce seuil : racine quasi exacte, arrêt.
pub const SEUIL_ZERO: f64 = 1e-10;

/// Décimales du tableau / CSV / démarche.
pub const PRECISION: usize = 6;

/// Échantillonnage de la courbe : 200 segments => 201 points.
pub const NB_SEGMENTS: usize = 200;

/// Marge ajoutée de part et d’autre de l’intervalle tracé.
pub const MARGE_X: f64 = 0.5;

/// Points de courbe avec |y| >= BORNE_Y ignorés (asymptotes).
pub const BORNE_Y: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parametres {
    pub max_iterations: usize,
    pub seuil_zero: f64,
    pub precision: usize,
    pub nb_segments: usize,
    pub marge_x: f64,
    pub borne_y: f64,
}

impl Default for Parametres {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            seuil_zero: SEUIL_ZERO,
            precision: PRECISION,
            nb_segments: NB_SEGMENTS,
            marge_x: MARGE_X,
            borne_y: BORNE_Y,
        }
    }
}
