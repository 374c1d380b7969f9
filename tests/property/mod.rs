mod uptime;
