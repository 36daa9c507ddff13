use crate::models::{ContactBalance, ContactExpenseLine, ParticipantId, SharedExpenseFact};
use log::debug;

/// Balance between `user` and `contact` over the expenses they share.
///
/// An expense counts as "user paid" when the user paid and the contact holds a
/// non-zero share, and as "contact paid" the other way round. Anything else in
/// `facts` is ignored. Settled shares are reported but left out of
/// `net_balance`.
pub fn pairwise_balance(
    user: &ParticipantId,
    contact: &ParticipantId,
    facts: &[SharedExpenseFact],
) -> ContactBalance {
    let mut balance = ContactBalance::new(user.clone(), contact.clone());

    for fact in facts.iter().filter(|fact| !fact.is_deleted()) {
        if &fact.payer == user {
            if let Some(line) = line_for(fact, contact) {
                balance.user_paid_grand_total += line.total;
                if line.settled {
                    balance.user_paid_settled += line.share;
                } else {
                    balance.user_paid_total += line.share;
                }
                balance.user_paid.push(line);
            }
        } else if &fact.payer == contact {
            if let Some(line) = line_for(fact, user) {
                balance.contact_paid_grand_total += line.total;
                if line.settled {
                    balance.contact_paid_settled += line.share;
                } else {
                    balance.contact_paid_total += line.share;
                }
                balance.contact_paid.push(line);
            }
        }
    }

    balance.net_balance = balance.user_paid_total - balance.contact_paid_total;
    debug!(
        "Contact balance between {} and {}: {} over {} expenses",
        user,
        contact,
        balance.net_balance,
        balance.user_paid.len() + balance.contact_paid.len()
    );
    balance
}

fn line_for(fact: &SharedExpenseFact, counterpart: &ParticipantId) -> Option<ContactExpenseLine> {
    let row = fact
        .share_of(counterpart)
        .filter(|row| !row.amount.is_zero())?;
    Some(ContactExpenseLine {
        expense_id: fact.id,
        description: fact.description.clone(),
        total: fact.total,
        share: row.amount,
        settled: row.settled,
    })
}
