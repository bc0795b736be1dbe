// Notification pipeline.
//
// dispatcher: builds and batches push messages, submits them, and hands
//             the resulting tickets to the reconciler.
// receipts:   polls the push service for delivery outcomes and logs
//             per-notification errors.
//
// Everything here is best-effort: failures are terminal at the logging
// boundary and never propagate back to the triggering event.

pub mod dispatcher;
pub mod receipts;
