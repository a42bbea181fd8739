use crate::game::*;

/// Anything that can sit on either side of the table.
///
/// Implementations are handed the legal menu and must pick from it; the
/// classroom rejects anything else, so a misbehaving agent only stalls
/// its own pairing.
pub trait Agent: Send {
    fn offer(&mut self, guilt: Guilt, menu: &[Offer]) -> Offer;
    fn respond(&mut self, offer: Offer, menu: &[Response]) -> Response;
}
