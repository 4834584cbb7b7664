//! Paths read from the battery monitor service.
pub const DC_VOLTAGE: &str = "/Dc/0/Voltage";
pub const DC_CURRENT: &str = "/Dc/0/Current";
pub const DC_POWER: &str = "/Dc/0/Power";
pub const DC_TEMPERATURE: &str = "/Dc/0/Temperature";
pub const CAPACITY: &str = "/Capacity";
pub const INSTALLED_CAPACITY: &str = "/InstalledCapacity";
pub const MAX_CHARGE_VOLTAGE: &str = "/Info/MaxChargeVoltage";
pub const MAX_CHARGE_CURRENT: &str = "/Info/MaxChargeCurrent";
pub const MAX_DISCHARGE_CURRENT: &str = "/Info/MaxDischargeCurrent";
pub const SOC: &str = "/Soc";
pub const MODULES_ONLINE: &str = "/System/NrOfModulesOnline";

// Alarms: 0 = clear
pub const ALARM_BMS_CABLE: &str = "/Alarms/BmsCable";
pub const ALARM_CELL_IMBALANCE: &str = "/Alarms/CellImbalance";
pub const ALARM_HIGH_CHARGE_CURRENT: &str = "/Alarms/HighChargeCurrent";
pub const ALARM_HIGH_CHARGE_TEMPERATURE: &str = "/Alarms/HighChargeTemperature";
pub const ALARM_HIGH_DISCHARGE_CURRENT: &str = "/Alarms/HighDischargeCurrent";
pub const ALARM_HIGH_TEMPERATURE: &str = "/Alarms/HighTemperature";
pub const ALARM_HIGH_VOLTAGE: &str = "/Alarms/HighVoltage";
pub const ALARM_INTERNAL_FAILURE: &str = "/Alarms/InternalFailure";
pub const ALARM_LOW_CELL_VOLTAGE: &str = "/Alarms/LowCellVoltage";
pub const ALARM_LOW_CHARGE_TEMPERATURE: &str = "/Alarms/LowChargeTemperature";
pub const ALARM_LOW_SOC: &str = "/Alarms/LowSoc";
pub const ALARM_LOW_TEMPERATURE: &str = "/Alarms/LowTemperature";
pub const ALARM_LOW_VOLTAGE: &str = "/Alarms/LowVoltage";

/// Every monitored path, in monitor-list order.
pub const ALL: &[&str] = &[
    DC_VOLTAGE,
    DC_CURRENT,
    DC_POWER,
    CAPACITY,
    INSTALLED_CAPACITY,
    MAX_CHARGE_VOLTAGE,
    MAX_CHARGE_CURRENT,
    MAX_DISCHARGE_CURRENT,
    SOC,
    MODULES_ONLINE,
    DC_TEMPERATURE,
    ALARM_BMS_CABLE,
    ALARM_CELL_IMBALANCE,
    ALARM_HIGH_CHARGE_CURRENT,
    ALARM_HIGH_CHARGE_TEMPERATURE,
    ALARM_HIGH_DISCHARGE_CURRENT,
    ALARM_HIGH_TEMPERATURE,
    ALARM_HIGH_VOLTAGE,
    ALARM_INTERNAL_FAILURE,
    ALARM_LOW_CELL_VOLTAGE,
    ALARM_LOW_CHARGE_TEMPERATURE,
    ALARM_LOW_SOC,
    ALARM_LOW_TEMPERATURE,
    ALARM_LOW_VOLTAGE,
];
