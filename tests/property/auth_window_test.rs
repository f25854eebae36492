// tests/property/auth_window_test.rs

//! The authentication window stays bounded and evicts in first-seen order.

use filechat::core::state::AuthState;
use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

proptest! {
    #[test]
    fn test_window_matches_fifo_model(
        capacity in 1usize..8,
        ops in prop::collection::vec((0u8..16, any::<bool>()), 0..100),
    ) {
        let auth = AuthState::new(HashMap::new(), capacity);
        let mut model: VecDeque<String> = VecDeque::new();

        for (n, is_revoke) in ops {
            let id = format!("s{n}");
            if is_revoke {
                auth.revoke(&id);
                model.retain(|m| m != &id);
            } else {
                auth.add_session(&id, "user");
                if !model.contains(&id) {
                    if model.len() >= capacity {
                        model.pop_front();
                    }
                    model.push_back(id);
                }
            }

            prop_assert!(auth.len() <= capacity);
            prop_assert_eq!(auth.len(), model.len());
        }

        for n in 0u8..16 {
            let id = format!("s{n}");
            prop_assert_eq!(auth.username_of(&id).is_some(), model.contains(&id));
        }
    }
}
