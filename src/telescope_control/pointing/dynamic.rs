use super::{refine, Correction};
use crate::astro_math::{map12, normalize_ha_dec};
use crate::config::{DynamicModelSettings, ObservingLocation};
use crate::util::*;

/// Drift measured on the guide camera, linear in hour angle away from a reference
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DynamicModel {
    pub reference_ha: Hours,
    pub reference_dec: Degrees,
    /// Pixels per hour of hour angle
    pub ha_rate: f64,
    pub dec_rate: f64,
    pub arcsec_per_pixel: f64,
}

impl DynamicModel {
    pub fn new(settings: &DynamicModelSettings) -> Self {
        Self {
            reference_ha: 0.,
            reference_dec: 0.,
            ha_rate: settings.ha_rate,
            dec_rate: settings.dec_rate,
            arcsec_per_pixel: settings.arcsec_per_pixel,
        }
    }

    pub fn set_reference(&mut self, ha: Hours, dec: Degrees) {
        self.reference_ha = map12(ha);
        self.reference_dec = dec;
    }

    pub fn set_rates(&mut self, ha_rate: f64, dec_rate: f64) {
        self.ha_rate = ha_rate;
        self.dec_rate = dec_rate;
    }

    /// Zeroes the rates and the reference, keeping the plate scale
    pub fn clear(&mut self) {
        self.reference_ha = 0.;
        self.reference_dec = 0.;
        self.ha_rate = 0.;
        self.dec_rate = 0.;
    }

    pub fn settings(&self) -> DynamicModelSettings {
        DynamicModelSettings {
            ha_rate: self.ha_rate,
            dec_rate: self.dec_rate,
            arcsec_per_pixel: self.arcsec_per_pixel,
        }
    }

    /// Real minus apparent at a real hour angle
    fn drift(&self, ha: Hours) -> (Hours, Degrees) {
        let delta_ha = map12(ha - self.reference_ha);
        let dha = delta_ha * self.ha_rate * self.arcsec_per_pixel / 54000.;
        let ddec = delta_ha * self.dec_rate * self.arcsec_per_pixel / 3600.;
        (dha, ddec)
    }
}

impl Default for DynamicModel {
    fn default() -> Self {
        Self::new(&DynamicModelSettings::default())
    }
}

impl Correction for DynamicModel {
    fn real_from_apparent(
        &self,
        ha: Hours,
        dec: Degrees,
        _site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        refine(ha, dec, |rha, _| {
            let (dha, ddec) = self.drift(rha);
            (ha + dha, dec + ddec)
        })
    }

    fn apparent_from_real(
        &self,
        ha: Hours,
        dec: Degrees,
        _site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        let (dha, ddec) = self.drift(ha);
        normalize_ha_dec(ha - dha, dec - ddec)
    }
}
