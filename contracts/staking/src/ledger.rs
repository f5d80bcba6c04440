use soroban_sdk::{contracttype, log, Env, Map, Vec};
use tessera::ttl::{PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL};

use crate::{
    error::ContractError,
    math::{mul_div, ACC_PRECISION},
    storage::{PointCredit, Pool},
};

#[derive(Clone)]
#[contracttype]
pub enum LedgerDataKey {
    PoolState(Pool),
    PoolPoints(Pool),
}

/// One asset paid out by a pool.
///
/// `accumulator` is the amount earned by a single point since launch, scaled by
/// [`ACC_PRECISION`]. `pending` holds what has been queued but not yet handed to
/// stakers: penalties, sale proceeds, emission of days nobody staked and rounding dust.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardStream {
    pub accumulator: u128,
    pub pending: u128,
}

impl RewardStream {
    /// Hands `pending + emission` to the `points` that were staked during one day.
    fn distribute(&mut self, env: &Env, emission: u128, points: u128) -> Result<(), ContractError> {
        let total = self
            .pending
            .checked_add(emission)
            .ok_or(ContractError::ContractMathError)?;
        if points == 0 || total == 0 {
            self.pending = total;
            return Ok(());
        }

        let per_point = mul_div(env, total, ACC_PRECISION, points)?;
        let distributed = mul_div(env, per_point, points, ACC_PRECISION)?;
        self.accumulator = self
            .accumulator
            .checked_add(per_point)
            .ok_or(ContractError::ContractMathError)?;
        self.pending = total - distributed;

        Ok(())
    }

    pub fn queue(&mut self, amount: u128) -> Result<(), ContractError> {
        self.pending = self
            .pending
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        Ok(())
    }

    /// Rewards earned by `points` since the accumulator read `debt`.
    pub fn earned(&self, env: &Env, points: u128, debt: u128) -> Result<u128, ContractError> {
        let delta = self
            .accumulator
            .checked_sub(debt)
            .ok_or(ContractError::ContractMathError)?;
        mul_div(env, points, delta, ACC_PRECISION)
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Points of every open position; the pool total of the current day
    pub live_points: u128,
    /// First day whose emission has not been distributed yet
    pub next_day: u64,
    /// Rewards paid in the system token
    pub native: RewardStream,
    /// Rewards paid in the partner asset
    pub partner: RewardStream,
    /// Partner asset held back for late bonuses
    pub bonus_reserve: u128,
}

impl PoolState {
    /// Distributes the emission of every finished day before `today`.
    ///
    /// No position opens, grows or closes between two calls, so every finished day
    /// was staked with `live_points` and the whole gap is settled at once.
    pub fn roll_forward(
        &mut self,
        env: &Env,
        today: u64,
        daily_emission: u128,
    ) -> Result<(), ContractError> {
        if self.next_day >= today {
            return Ok(());
        }

        let days = u128::from(today - self.next_day);
        let emission = daily_emission
            .checked_mul(days)
            .ok_or(ContractError::ContractMathError)?;
        self.native.distribute(env, emission, self.live_points)?;
        self.partner.distribute(env, 0, self.live_points)?;
        self.next_day = today;

        Ok(())
    }

    /// Sets aside `amount` of the partner asset for late bonuses; it is never
    /// distributed by [`PoolState::roll_forward`].
    pub fn reserve_bonus(&mut self, amount: u128) -> Result<(), ContractError> {
        self.bonus_reserve = self
            .bonus_reserve
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        Ok(())
    }

    /// Pays up to `amount` out of the bonus reserve and returns what was paid.
    pub fn draw_bonus(&mut self, amount: u128) -> u128 {
        let drawn = amount.min(self.bonus_reserve);
        self.bonus_reserve -= drawn;
        drawn
    }
}

/// Point ledger and emission state of one pool, loaded as a unit and written back
/// only when an operation commits.
pub struct PoolLedger {
    env: Env,
    pool: Pool,
    pub state: PoolState,
    credits: Map<u64, u128>,
}

impl PoolLedger {
    pub fn load(env: &Env, pool: Pool) -> Self {
        let storage = env.storage().persistent();
        let state_key = LedgerDataKey::PoolState(pool);
        let points_key = LedgerDataKey::PoolPoints(pool);

        let state = storage.get(&state_key).unwrap_or_default();
        let credits = storage
            .get(&points_key)
            .unwrap_or_else(|| Map::new(env));

        for key in [state_key, points_key] {
            if storage.has(&key) {
                storage.extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
            }
        }

        PoolLedger {
            env: env.clone(),
            pool,
            state,
            credits,
        }
    }

    /// Starts the pool's day counter; days before `day` never emit.
    pub fn start_at(env: &Env, pool: Pool, day: u64) {
        let ledger = PoolLedger {
            env: env.clone(),
            pool,
            state: PoolState {
                next_day: day,
                ..PoolState::default()
            },
            credits: Map::new(env),
        };
        ledger.save();
    }

    pub fn save(&self) {
        let storage = self.env.storage().persistent();
        let state_key = LedgerDataKey::PoolState(self.pool);
        let points_key = LedgerDataKey::PoolPoints(self.pool);

        storage.set(&state_key, &self.state);
        storage.set(&points_key, &self.credits);
        for key in [state_key, points_key] {
            storage.extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
        }
    }

    pub fn roll_forward(&mut self, today: u64, daily_emission: u128) -> Result<(), ContractError> {
        self.state.roll_forward(&self.env, today, daily_emission)
    }

    /// Adds `points` to the pool from `day` on.
    pub fn credit(&mut self, day: u64, points: u128) -> Result<(), ContractError> {
        let on_day = self.credits.get(day).unwrap_or(0);
        let on_day = on_day
            .checked_add(points)
            .ok_or(ContractError::ContractMathError)?;
        self.credits.set(day, on_day);
        self.state.live_points = self
            .state
            .live_points
            .checked_add(points)
            .ok_or(ContractError::ContractMathError)?;

        Ok(())
    }

    /// Takes back every credit a closing position made.
    pub fn debit(&mut self, credits: &Vec<PointCredit>) -> Result<(), ContractError> {
        for credit in credits.iter() {
            let on_day = self.credits.get(credit.day).unwrap_or(0);
            let remaining = on_day.checked_sub(credit.points).ok_or_else(|| {
                log!(
                    &self.env,
                    "Staking: Debit points: day {} holds less than the position credited",
                    credit.day
                );
                ContractError::ContractMathError
            })?;
            if remaining == 0 {
                self.credits.remove(credit.day);
            } else {
                self.credits.set(credit.day, remaining);
            }
            self.state.live_points = self
                .state
                .live_points
                .checked_sub(credit.points)
                .ok_or(ContractError::ContractMathError)?;
        }

        Ok(())
    }

    /// Total points of the open positions that were accruing on `day`.
    ///
    /// Closed positions are taken out of every day they were credited to, so past
    /// days only count what is still open.
    pub fn points_on_day(&self, day: u64) -> Result<u128, ContractError> {
        let mut total = 0u128;
        for (credit_day, points) in self.credits.iter() {
            if credit_day > day {
                break;
            }
            total = total
                .checked_add(points)
                .ok_or(ContractError::ContractMathError)?;
        }

        Ok(total)
    }
}
