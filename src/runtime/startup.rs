use rand::Rng;

use crate::app::Visualizer;
use crate::audio::Playback;
use crate::catalog::TrackChange;

/// Start the first track: a random pick from the catalog at the configured volume.
pub fn start_playback<P, R>(app: &mut Visualizer, player: &mut P, rng: &mut R)
where
    P: Playback + ?Sized,
    R: Rng + ?Sized,
{
    log::info!("{} tracks available", app.catalog.len());
    app.change_track(player, TrackChange::Random, rng);
    player.set_volume(app.volume());
}
