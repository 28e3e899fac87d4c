use crate::astro_math::map12;
use crate::clock::Clock;
use crate::config::OffsetSettings;
use crate::telescope_control::connection::Transport;
use crate::telescope_control::pointing::{DynamicModel, Offset};
use crate::telescope_control::Mount;
use crate::util::*;

/// Neither the telescope nor the reference star may be closer than this to a pole
const OFFSET_REFERENCE_MAX_DEC: Degrees = 85.;

impl<T: Transport, C: Clock> Mount<T, C> {
    /*** Pointing model ***/

    /// Stages applied by default when predicting pier side
    pub fn pointing_model(&self) -> PointingModelFlags {
        self.settings.pointing_model
    }

    pub fn set_pointing_model(&mut self, flags: PointingModelFlags) -> PointingResult<()> {
        self.check_parameter_lease()?;
        self.settings.pointing_model = flags;
        tracing::info!("Pointing model set to {:?}", flags);
        Ok(())
    }

    /*** Offset ***/

    pub fn offset(&self) -> Offset {
        self.settings.chain.offset
    }

    /// Recomputes the offset so the current position reads as the given reference
    /// coordinates. The position is taken with every enabled stage except the offset itself.
    pub async fn set_offset_reference(&mut self, ra: Hours, dec: Degrees) -> PointingResult<Offset> {
        self.check_parameter_lease()?;
        check_ra(ra)?;
        check_dec(dec)?;

        let flags = self.settings.pointing_model.without_offset();
        let (tel_ra, tel_dec) = self.get_position(flags).await?;

        if tel_dec.abs() > OFFSET_REFERENCE_MAX_DEC || dec.abs() > OFFSET_REFERENCE_MAX_DEC {
            tracing::warn!("Offset reference too close to the pole");
            return Err(PointingError::alignment(format_args!(
                "Declinations {:.2} / {:.2} are within {} deg of a pole",
                tel_dec,
                dec,
                90. - OFFSET_REFERENCE_MAX_DEC
            )));
        }

        let offset = Offset::new(map12(tel_ra - ra), dec - tel_dec).map_err(|e| {
            tracing::warn!("Offset reference rejected: {}", e);
            e
        })?;
        self.settings.chain.offset = offset;
        tracing::info!("Offset set to {:?}", offset);
        Ok(offset)
    }

    /// Reinstates a saved offset
    pub fn restore_offset(&mut self, saved: OffsetSettings) -> PointingResult<()> {
        self.check_parameter_lease()?;
        self.settings.chain.offset = Offset::try_from(saved)?;
        Ok(())
    }

    pub fn clear_offset(&mut self) -> PointingResult<()> {
        self.check_parameter_lease()?;
        self.settings.chain.offset = Offset::ZERO;
        Ok(())
    }

    /*** Dynamic model ***/

    pub fn dynamic_model(&self) -> DynamicModel {
        self.settings.chain.dynamic
    }

    /// Anchors the dynamic model at the telescope's current position
    pub async fn set_dynamic_model_reference(&mut self) -> PointingResult<()> {
        self.check_parameter_lease()?;
        let flags = PointingModelFlags {
            dynamic: false,
            ..self.settings.pointing_model
        };
        let (ha, dec) = self.read_real_ha_dec(flags).await?;
        self.settings.chain.dynamic.set_reference(ha, dec);
        tracing::info!("Dynamic model reference set to HA {} / Dec {}", ha, dec);
        Ok(())
    }

    /// Sets the drift rates (pixels per hour) and re-anchors the model here
    pub async fn set_dynamic_model_rates(&mut self, ha_rate: f64, dec_rate: f64) -> PointingResult<()> {
        self.check_parameter_lease()?;
        self.settings.chain.dynamic.set_rates(ha_rate, dec_rate);
        self.set_dynamic_model_reference().await
    }

    pub fn clear_dynamic_model(&mut self) -> PointingResult<()> {
        self.check_parameter_lease()?;
        self.settings.chain.dynamic.clear();
        Ok(())
    }
}
