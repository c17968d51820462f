// implemented by components whose subscriptions and timers must be released explicitly,
// since Rc cycles through event callbacks are never cleaned up on their own
pub trait Destroyable {
    fn destroy(&mut self);
}
